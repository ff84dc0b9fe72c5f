// All LLM prompt constants for the interview module.
//
// Every template instructs the model to answer in a shape the line-prefix
// parsers in `generator` and `evaluation` understand. Keep the two in sync.

/// Question generation prompt template.
/// Replace: {num_questions}, {topic_text}, {difficulty}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate {num_questions} technical interview questions{topic_text}
at {difficulty} difficulty level.

Provide exactly {num_questions} questions, numbered 1-{num_questions}.
Make them clear, specific, and appropriate for a {difficulty} difficulty interview."#;

/// CV-based question generation prompt template.
/// Replace: {num_questions}, {difficulty}, {cv_analysis}
pub const CV_QUESTION_PROMPT_TEMPLATE: &str = r#"Based on the following CV analysis, generate {num_questions} interview questions
at {difficulty} difficulty level. The questions should be relevant to the candidate's background
and test their knowledge and experience.

CV Analysis:
{cv_analysis}

Generate {num_questions} questions, numbered 1-{num_questions}.
Make them specific, relevant, and appropriate for a {difficulty} difficulty interview.
Each question should be on a new line starting with the number."#;

/// Single-answer evaluation prompt template.
/// Replace: {question}, {answer}
pub const ANSWER_EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate the following interview answer on a scale of 0-10.

Question: {question}

Answer: {answer}

Provide:
1. A score (0-10)
2. Strengths of the answer
3. Areas for improvement
4. Overall feedback

Format your response as:
Score: [number]
Strengths: [text]
Areas for Improvement: [text]
Overall Feedback: [text]"#;

/// Whole-interview evaluation prompt template.
/// Replace: {transcript}
pub const INTERVIEW_EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate the following interview session. Provide an overall assessment.

{transcript}

Provide:
1. Overall Score (0-100)
2. Strengths demonstrated across the interview
3. Areas needing improvement
4. Specific recommendations for the candidate
5. Summary feedback

Format your response clearly with these sections."#;
