//! Interview sessions — question generation, answer and whole-interview
//! evaluation, and the handlers that drive a session from setup to scoring.

pub mod evaluation;
pub mod generator;
pub mod handlers;
pub mod prompts;

use crate::errors::AppError;

pub const MIN_QUESTIONS: i32 = 3;
pub const MAX_QUESTIONS: i32 = 10;

const DIFFICULTY_LEVELS: &[&str] = &["easy", "medium", "hard"];

/// Validates the interview setup parameters coming from the caller.
pub fn validate_setup(question_count: i32, difficulty: &str) -> Result<(), AppError> {
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&question_count) {
        return Err(AppError::Validation(format!(
            "Question count must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"
        )));
    }
    if !DIFFICULTY_LEVELS.contains(&difficulty) {
        return Err(AppError::Validation(format!(
            "Difficulty must be one of: {}",
            DIFFICULTY_LEVELS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_setup_accepts_known_difficulties() {
        for level in ["easy", "medium", "hard"] {
            assert!(validate_setup(5, level).is_ok());
        }
    }

    #[test]
    fn test_validate_setup_rejects_unknown_difficulty() {
        assert!(validate_setup(5, "impossible").is_err());
        assert!(validate_setup(5, "Easy").is_err());
    }

    #[test]
    fn test_validate_setup_enforces_question_range() {
        assert!(validate_setup(2, "medium").is_err());
        assert!(validate_setup(3, "medium").is_ok());
        assert!(validate_setup(10, "medium").is_ok());
        assert!(validate_setup(11, "medium").is_err());
    }
}
