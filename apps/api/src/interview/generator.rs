//! Question generation — builds the generation prompts, submits them to the
//! completion client, and parses the numbered-list reply into questions.

use tracing::info;

use crate::errors::AppError;
use crate::interview::prompts::{CV_QUESTION_PROMPT_TEMPLATE, QUESTION_PROMPT_TEMPLATE};
use crate::llm_client::{CompletionClient, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Generates `num_questions` interview questions, optionally focused on a
/// topic. The reply is parsed with the numbered-list heuristic.
pub async fn generate_questions(
    llm: &dyn CompletionClient,
    num_questions: usize,
    difficulty: &str,
    topic: Option<&str>,
) -> Result<Vec<String>, AppError> {
    let topic_text = topic.map(|t| format!(" about {t}")).unwrap_or_default();
    let prompt = QUESTION_PROMPT_TEMPLATE
        .replace("{num_questions}", &num_questions.to_string())
        .replace("{topic_text}", &topic_text)
        .replace("{difficulty}", difficulty);

    let response = llm
        .complete(&prompt, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    let questions = parse_questions(&response, num_questions);
    info!("Generated {} questions ({difficulty})", questions.len());
    Ok(questions)
}

/// Generates questions grounded in a CV analysis instead of a generic topic.
pub async fn generate_cv_questions(
    llm: &dyn CompletionClient,
    cv_analysis: &str,
    num_questions: usize,
    difficulty: &str,
) -> Result<Vec<String>, AppError> {
    let prompt = CV_QUESTION_PROMPT_TEMPLATE
        .replace("{num_questions}", &num_questions.to_string())
        .replace("{difficulty}", difficulty)
        .replace("{cv_analysis}", cv_analysis);

    let response = llm
        .complete(&prompt, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("CV question generation failed: {e}")))?;

    let questions = parse_questions(&response, num_questions);
    info!(
        "Generated {} CV-based questions ({difficulty})",
        questions.len()
    );
    Ok(questions)
}

/// Parses a free-text reply into individual questions.
///
/// Keeps lines that start with a digit or a dash, strips the leading
/// numbering run (`digits`, `.`, `-`, `)`, spaces), and truncates to the
/// requested count.
pub fn parse_questions(response: &str, limit: usize) -> Vec<String> {
    let mut questions = Vec::new();

    for line in response.lines() {
        let line = line.trim();
        let starts_like_item = line
            .chars()
            .next()
            .map(|c| c.is_ascii_digit() || c == '-')
            .unwrap_or(false);
        if !starts_like_item {
            continue;
        }

        let question = line
            .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | ')' | ' '))
            .trim();
        if !question.is_empty() {
            questions.push(question.to_string());
        }
    }

    questions.truncate(limit);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_numbered_list_in_order() {
        let response = "1. What is X?\n2. Explain Y.";
        let questions = parse_questions(response, 2);
        assert_eq!(questions, vec!["What is X?", "Explain Y."]);
    }

    #[test]
    fn test_parse_questions_trims_whitespace_and_numbering() {
        let response = "  1)  What is ownership?  \n 2.   Describe borrowing. ";
        let questions = parse_questions(response, 2);
        assert_eq!(questions, vec!["What is ownership?", "Describe borrowing."]);
    }

    #[test]
    fn test_parse_questions_accepts_dash_lists() {
        let response = "- What is X?\n- Explain Y.";
        let questions = parse_questions(response, 2);
        assert_eq!(questions, vec!["What is X?", "Explain Y."]);
    }

    #[test]
    fn test_parse_questions_skips_prose_lines() {
        let response = "Here are your questions:\n\n1. What is X?\nGood luck!\n2. Explain Y.";
        let questions = parse_questions(response, 5);
        assert_eq!(questions, vec!["What is X?", "Explain Y."]);
    }

    #[test]
    fn test_parse_questions_truncates_to_requested_count() {
        let response = "1. A?\n2. B?\n3. C?\n4. D?";
        let questions = parse_questions(response, 2);
        assert_eq!(questions, vec!["A?", "B?"]);
    }

    #[test]
    fn test_parse_questions_exact_count_for_well_formed_list() {
        let response = "1. What is X?\n2. Explain Y.\n3. Compare A and B.";
        let questions = parse_questions(response, 3);
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn test_parse_questions_drops_empty_items() {
        let response = "1.\n2. Real question?";
        let questions = parse_questions(response, 5);
        assert_eq!(questions, vec!["Real question?"]);
    }

    #[test]
    fn test_parse_questions_empty_response() {
        assert!(parse_questions("", 5).is_empty());
        assert!(parse_questions("No list here at all.", 5).is_empty());
    }
}
