use regex::Regex;
use std::sync::OnceLock;

fn trailing_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d+)/$").unwrap_or_else(|_| unreachable!("static regex")))
}

/// Numeric id from a canonical resource url ending in `/<digits>/`.
#[must_use]
pub fn extract_id(url: &str) -> Option<&str> {
    trailing_id_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `<image_base>/<id>.jpg` for a resource url, or `None` when the url has no trailing id.
#[must_use]
pub fn image_address(image_base: &str, url: &str) -> Option<String> {
    let id = extract_id(url)?;
    Some(format!("{}/{id}.jpg", image_base.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_trailing_digits() {
        assert_eq!(extract_id("https://x/people/4/"), Some("4"));
        assert_eq!(extract_id("https://swapi.dev/api/vehicles/14/"), Some("14"));
    }

    #[test]
    fn missing_trailing_segment_yields_none() {
        assert_eq!(extract_id("https://x/people/"), None);
        assert_eq!(extract_id("https://x/people/4"), None);
        assert_eq!(extract_id("https://x/people/4a/"), None);
        assert_eq!(extract_id(""), None);
    }

    #[test]
    fn image_address_uses_id_and_trims_base() {
        assert_eq!(
            image_address("https://img.example/chars/", "https://x/people/1/").as_deref(),
            Some("https://img.example/chars/1.jpg")
        );
        assert_eq!(image_address("https://img.example/chars", "https://x/people/"), None);
    }

    proptest! {
        #[test]
        fn any_numeric_segment_is_recovered(id in 0u32..1_000_000, prefix in "[a-z]{1,8}") {
            let url = format!("https://host/{prefix}/{id}/");
            let expected = id.to_string();
            prop_assert_eq!(extract_id(&url), Some(expected.as_str()));
        }
    }
}
