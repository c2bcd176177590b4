use regex::Regex;

use crate::extractor::error::ExtractorError;

#[inline]
pub fn capture_named<'a>(re: &Regex, input: &'a str, name: &str) -> Option<&'a str> {
    re.captures(input)
        .and_then(|caps| caps.name(name))
        .map(|m| m.as_str())
}

#[inline]
pub fn capture_named_or_invalid_url<'a>(
    re: &Regex,
    input: &'a str,
    name: &str,
) -> Result<&'a str, ExtractorError> {
    capture_named(re, input, name).ok_or_else(|| ExtractorError::InvalidUrl(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_named_returns_group() {
        let re = Regex::new(r"^/(?P<id>\w+)").unwrap();
        assert_eq!(capture_named(&re, "/abc", "id"), Some("abc"));
        assert_eq!(capture_named(&re, "abc", "id"), None);
        assert!(matches!(
            capture_named_or_invalid_url(&re, "abc", "id"),
            Err(ExtractorError::InvalidUrl(url)) if url == "abc"
        ));
    }
}
