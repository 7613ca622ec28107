const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PATTERNS: [(&str, &str); 6] = [
    ("Bearer ", "Bearer [REDACTED]"),
    ("api_key=", "api_key=[REDACTED]"),
    ("key=", "key=[REDACTED]"),
    ("password=", "password=[REDACTED]"),
    ("secret=", "secret=[REDACTED]"),
    ("token=", "token=[REDACTED]"),
];

/// Shortens instruction text for log lines and masks anything credential-shaped.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let sanitized = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((cut, _)) => format!("{}... ({} chars total)", &trimmed[..cut], total_chars),
        None => trimmed.to_string(),
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in SENSITIVE_PATTERNS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let idx = search_from + found;
            let value_start = idx + pattern.len();
            if result[value_start..].starts_with("[REDACTED]") {
                search_from = value_start;
                continue;
            }
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
            search_from = idx + replacement.len();
        }
    }

    result
}
