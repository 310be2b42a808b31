use once_cell::sync::Lazy;
use regex::Regex;

// Double-quoted spans become single tokens; an escaped quote inside a span
// stays part of it (backslash included). Everything else splits on
// whitespace.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:\\"|[^"])+)"|(\S+)"#).expect("valid tokenizer regex"));

/// Split a chat command line into argument tokens.
pub fn tokenize(content: &str) -> Vec<String> {
    TOKEN
        .captures_iter(content)
        .filter_map(|captures| {
            captures
                .get(1)
                .or_else(|| captures.get(2))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}
