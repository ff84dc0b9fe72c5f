//! Answer and interview scoring — line-prefix parsing of the evaluation
//! replies, with fallback values instead of propagated errors.
//!
//! Remote failures here are deliberately converted into feedback text shown
//! to the end user. Only the surrounding persistence decides whether a
//! failed evaluation is stored.

use serde::Serialize;
use tracing::warn;

use crate::interview::prompts::{
    ANSWER_EVALUATION_PROMPT_TEMPLATE, INTERVIEW_EVALUATION_PROMPT_TEMPLATE,
};
use crate::llm_client::{CompletionClient, DEFAULT_TEMPERATURE};

const ANSWER_EVAL_MAX_TOKENS: u32 = 500;
const INTERVIEW_EVAL_MAX_TOKENS: u32 = 1500;

/// Score used when a `Score:` line is present but unparseable.
const FALLBACK_ANSWER_SCORE: f64 = 5.0;
/// Score used when the whole-interview reply carries no score line at all.
const DEFAULT_INTERVIEW_SCORE: f64 = 50.0;

/// Structured result of a single-answer evaluation (0-10 scale).
#[derive(Debug, Clone, Serialize)]
pub struct AnswerEvaluation {
    pub score: f64,
    pub strengths: String,
    pub improvements: String,
    pub feedback: String,
    pub raw_evaluation: String,
}

/// Structured result of a whole-interview evaluation (0-100 scale).
#[derive(Debug, Clone, Serialize)]
pub struct InterviewEvaluation {
    pub overall_score: f64,
    pub evaluation_text: String,
    pub success: bool,
}

/// Evaluates one answer. A remote failure yields a zero score and a feedback
/// string carrying the error message rather than an error.
pub async fn evaluate_answer(
    llm: &dyn CompletionClient,
    question: &str,
    answer: &str,
) -> AnswerEvaluation {
    let prompt = ANSWER_EVALUATION_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer);

    match llm
        .complete(&prompt, ANSWER_EVAL_MAX_TOKENS, DEFAULT_TEMPERATURE)
        .await
    {
        Ok(response) => parse_answer_evaluation(&response),
        Err(e) => {
            warn!("Answer evaluation failed: {e}");
            AnswerEvaluation {
                score: 0.0,
                strengths: String::new(),
                improvements: String::new(),
                feedback: format!("Error evaluating answer: {e}"),
                raw_evaluation: String::new(),
            }
        }
    }
}

/// Parses the `Score:` / `Strengths:` / `Areas for Improvement:` /
/// `Overall Feedback:` lines of an answer-evaluation reply.
pub fn parse_answer_evaluation(response: &str) -> AnswerEvaluation {
    let mut score = 0.0;
    let mut strengths = String::new();
    let mut improvements = String::new();
    let mut feedback = String::new();

    for line in response.lines() {
        if let Some(rest) = line.strip_prefix("Score:") {
            score = rest.trim().parse::<f64>().unwrap_or(FALLBACK_ANSWER_SCORE);
        } else if let Some(rest) = line.strip_prefix("Strengths:") {
            strengths = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Areas for Improvement:") {
            improvements = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Overall Feedback:") {
            feedback = rest.trim().to_string();
        }
    }

    AnswerEvaluation {
        score,
        strengths,
        improvements,
        feedback,
        raw_evaluation: response.to_string(),
    }
}

/// Evaluates a whole interview from its (question, answer) transcript.
/// Remote failures yield a zero score and the error message as the text.
pub async fn evaluate_interview(
    llm: &dyn CompletionClient,
    questions_and_answers: &[(String, String)],
) -> InterviewEvaluation {
    let transcript = questions_and_answers
        .iter()
        .enumerate()
        .map(|(i, (q, a))| format!("Q{n}: {q}\nA{n}: {a}", n = i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = INTERVIEW_EVALUATION_PROMPT_TEMPLATE.replace("{transcript}", &transcript);

    match llm
        .complete(&prompt, INTERVIEW_EVAL_MAX_TOKENS, DEFAULT_TEMPERATURE)
        .await
    {
        Ok(response) => InterviewEvaluation {
            overall_score: extract_overall_score(&response),
            evaluation_text: response,
            success: true,
        },
        Err(e) => {
            warn!("Interview evaluation failed: {e}");
            InterviewEvaluation {
                overall_score: 0.0,
                evaluation_text: format!("Error during evaluation: {e}"),
                success: false,
            }
        }
    }
}

/// Pulls the overall score out of a free-text reply: the first line that
/// mentions "score" and carries a colon contributes its first digit run
/// after the colon. Defaults to 50 when no such line parses.
pub fn extract_overall_score(response: &str) -> f64 {
    for line in response.lines() {
        if !line.to_lowercase().contains("score") {
            continue;
        }
        let Some((_, rest)) = line.split_once(':') else {
            continue;
        };

        let digits: String = rest
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(score) = digits.parse::<f64>() {
            return score;
        }
    }
    DEFAULT_INTERVIEW_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Score: 8.5\n\
        Strengths: Clear explanation of ownership semantics.\n\
        Areas for Improvement: Did not mention lifetimes.\n\
        Overall Feedback: Solid answer with room for depth.";

    #[test]
    fn test_parse_answer_evaluation_well_formed() {
        let eval = parse_answer_evaluation(WELL_FORMED);
        assert!((eval.score - 8.5).abs() < f64::EPSILON);
        assert_eq!(eval.strengths, "Clear explanation of ownership semantics.");
        assert_eq!(eval.improvements, "Did not mention lifetimes.");
        assert_eq!(eval.feedback, "Solid answer with room for depth.");
        assert_eq!(eval.raw_evaluation, WELL_FORMED);
    }

    #[test]
    fn test_parse_answer_evaluation_unparseable_score_falls_back() {
        let eval = parse_answer_evaluation("Score: eight out of ten\nStrengths: ok");
        assert!((eval.score - FALLBACK_ANSWER_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_answer_evaluation_missing_sections_are_empty() {
        let eval = parse_answer_evaluation("Some unstructured reply.");
        assert!((eval.score - 0.0).abs() < f64::EPSILON);
        assert!(eval.strengths.is_empty());
        assert!(eval.improvements.is_empty());
        assert!(eval.feedback.is_empty());
        assert_eq!(eval.raw_evaluation, "Some unstructured reply.");
    }

    #[test]
    fn test_extract_overall_score_plain_number() {
        assert!((extract_overall_score("Overall Score: 85") - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_overall_score_takes_first_digit_run() {
        // "85/100" must read as 85, not a concatenation of all digits
        assert!((extract_overall_score("Overall Score: 85/100") - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_overall_score_case_insensitive() {
        assert!((extract_overall_score("overall SCORE: 72 points") - 72.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_overall_score_skips_unscored_lines() {
        let text = "The candidate did well.\nScore discussion follows\nFinal score: 64";
        assert!((extract_overall_score(text) - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_overall_score_default_when_absent() {
        assert!(
            (extract_overall_score("No numeric assessment here.") - DEFAULT_INTERVIEW_SCORE).abs()
                < f64::EPSILON
        );
    }

    struct FailingClient;

    #[async_trait::async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _: &str, _: u32, _: f32) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    struct CannedClient(&'static str);

    #[async_trait::async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, _: &str, _: u32, _: f32) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    use crate::llm_client::LlmError;

    #[tokio::test]
    async fn test_evaluate_answer_remote_failure_becomes_feedback() {
        let eval = evaluate_answer(&FailingClient, "Q?", "A.").await;
        assert!((eval.score - 0.0).abs() < f64::EPSILON);
        assert!(eval.feedback.starts_with("Error evaluating answer:"));
        assert!(eval.raw_evaluation.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_interview_remote_failure_becomes_text() {
        let qa = vec![("Q1?".to_string(), "A1.".to_string())];
        let eval = evaluate_interview(&FailingClient, &qa).await;
        assert!(!eval.success);
        assert!((eval.overall_score - 0.0).abs() < f64::EPSILON);
        assert!(eval.evaluation_text.starts_with("Error during evaluation:"));
    }

    #[tokio::test]
    async fn test_evaluate_interview_reads_score_from_reply() {
        let qa = vec![
            ("Q1?".to_string(), "A1.".to_string()),
            ("Q2?".to_string(), "A2.".to_string()),
        ];
        let eval = evaluate_interview(&CannedClient("Overall Score: 78\nGood session."), &qa).await;
        assert!(eval.success);
        assert!((eval.overall_score - 78.0).abs() < f64::EPSILON);
    }
}
