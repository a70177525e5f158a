// Evaluation prompts.

/// One-shot evaluation prompt.
/// Replace: {job_description}, {chat_history_json}, {no_fences_instruction}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer. Evaluate the following interview for the position described between the ROLE markers.

----- ROLE -----
{job_description}
----- END ROLE -----

Chat History (JSON array; role "user" is the candidate, role "model" is the interviewer):
{chat_history_json}

Please provide a structured evaluation in JSON format with exactly these fields:
- score (integer 0-10)
- strengths (array of strings)
- weaknesses (array of strings)
- feedback (overall summary string)

{no_fences_instruction}"#;
