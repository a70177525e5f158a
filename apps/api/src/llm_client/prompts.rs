// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt sent with one-shot structured calls; enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose output is parsed as JSON.
pub const NO_FENCES_INSTRUCTION: &str =
    "Do not include markdown formatting (like ```json). Just return the raw JSON object.";

/// Fills `{name}` placeholders in a single pass over `template`.
///
/// Substituted values are never rescanned, so user text containing a
/// placeholder name is inserted literally. Unknown placeholders are kept.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let replaced = tail.find('}').and_then(|end| {
            let key = &tail[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Trims `text` and cuts it to at most `max_chars` characters.
pub fn bound_field(text: &str, max_chars: usize) -> &str {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
