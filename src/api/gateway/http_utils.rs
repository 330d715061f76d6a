//! Shared HTTP helpers for the reqwest gateway.

/// Maximum number of body characters echoed into an error message.
const MAX_BODY_CHARS: usize = 160;

/// Extracts a human-readable message from a backend error body.
///
/// Spring-style error bodies carry `message` and `error`; `message` wins when
/// both are present and non-empty.
pub(super) fn extract_backend_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

/// Returns the backend message, or a truncated copy of the raw body.
pub(super) fn describe_error_body(body: &str) -> Option<String> {
    extract_backend_message(body).or_else(|| {
        let trimmed = body.trim();
        (!trimmed.is_empty()).then(|| truncate_for_message(trimmed, MAX_BODY_CHARS))
    })
}

pub(super) fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
