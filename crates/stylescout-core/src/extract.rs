use crate::error::{PipelineError, Result};
use serde_json::Value;

/// Recover a JSON value from untrusted model text.
///
/// Ordered attempts, first success wins: the whole trimmed text, the interior
/// of a ```json fence, the first balanced `{ ... }` object, and finally the
/// greedy first-`{`-to-last-`}` span. The ordering favors structured output
/// over loose scraping.
pub fn extract_json(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }
    if let Some(inner) = fenced_json(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(inner.trim()) {
            return Ok(value);
        }
    }
    if let Some(span) = balanced_object(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(span) {
            return Ok(value);
        }
    }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }
    Err(PipelineError::Extraction {
        raw: text.to_string(),
    })
}

fn fenced_json(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(&rest[..end])
}

/// Span of the first complete top-level object, tracking brace depth and
/// string state so braces inside string values do not terminate the scan.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
