// LLM prompt constants for CV analysis.

/// CV analysis prompt template. Replace `{cv_text}` before sending.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following CV/Resume and extract key information in a structured format.

Provide the analysis in the following format:
- Skills: List the main technical and soft skills
- Experience: Summarize work experience and years
- Education: List educational background
- Key Strengths: Identify 3-5 key strengths
- Potential Interview Topics: Suggest 5 topics that would be good to discuss in an interview

CV Content:
{cv_text}

Provide a comprehensive but concise analysis."#;
