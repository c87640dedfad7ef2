use regex::Regex;

fn absolute_url_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Two or more scheme characters so Windows drive letters (`C:\`) stay relative.
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]+:").expect("invalid url scheme regex")
    })
}

/// Determine whether a manifest URL already carries a scheme and must not be prefixed.
///
/// CDN URLs (`https://cdn.example.com/app.js`) and data URIs are emitted exactly as the
/// build wrote them, regardless of any configured root prefix.
pub fn is_absolute_url(value: &str) -> bool {
    absolute_url_pattern().is_match(value.trim_start())
}
