use once_cell::sync::Lazy;

/// Fallback for local development against a backend on its default port.
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Base URL of the marketplace REST API, resolved once at startup from
/// the `ENCORE_API_URL` compile-time environment variable.
pub fn api_url() -> &'static str {
    static API_URL: Lazy<String> =
        Lazy::new(|| normalize(option_env!("ENCORE_API_URL").unwrap_or(DEFAULT_API_URL)));
    &API_URL
}

/// Requests are built as `{base}{path}` with a leading slash on every
/// path, so the base must not end with one.
fn normalize(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::normalize;

    #[rstest]
    #[case("http://127.0.0.1:8000", "http://127.0.0.1:8000")]
    #[case("http://127.0.0.1:8000/", "http://127.0.0.1:8000")]
    #[case("https://api.encore.example//", "https://api.encore.example")]
    fn normalize_should_strip_trailing_slashes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }
}
