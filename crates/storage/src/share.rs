//! Theme import/export and share links.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use folio_theme::ThemeConfig;
use serde_json::Value;

/// Query parameter selecting a built-in or stored theme by id.
pub const THEME_PARAM: &str = "theme";
/// Query parameter carrying an encoded theme.
pub const CUSTOM_THEME_PARAM: &str = "customTheme";

/// Pretty-printed JSON (2-space indent).
pub fn export_theme(theme: &ThemeConfig) -> String {
    match serde_json::to_string_pretty(theme) {
        Ok(json) => json,
        Err(e) => {
            folio_logger::error(format!("Failed to export theme '{}': {}", theme.id, e));
            String::new()
        }
    }
}

/// Parse a theme from JSON.
///
/// Only the shape is checked: non-empty `id` and `name` and a `colors`
/// object. Color values are not validated here.
pub fn import_theme(json: &str) -> Option<ThemeConfig> {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            folio_logger::error(format!("Failed to import theme: {}", e));
            return None;
        }
    };

    let non_empty = |field: &str| {
        value
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    let has_colors = value.get("colors").is_some_and(Value::is_object);
    if !non_empty("id") || !non_empty("name") || !has_colors {
        folio_logger::error("Invalid theme format");
        return None;
    }

    match serde_json::from_value(value) {
        Ok(theme) => Some(theme),
        Err(e) => {
            folio_logger::error(format!("Failed to import theme: {}", e));
            None
        }
    }
}

/// Compact JSON, base64 with the URL-safe alphabet and no padding.
pub fn encode_theme_for_url(theme: &ThemeConfig) -> String {
    match serde_json::to_string(theme) {
        Ok(json) => URL_SAFE_NO_PAD.encode(json),
        Err(e) => {
            folio_logger::error(format!("Failed to encode theme for URL: {}", e));
            String::new()
        }
    }
}

/// Inverse of [`encode_theme_for_url`]. Padding and the standard `+`/`/`
/// alphabet are tolerated.
pub fn decode_theme_from_url(encoded: &str) -> Option<ThemeConfig> {
    let normalized: String = encoded
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();

    let bytes = match URL_SAFE_NO_PAD.decode(normalized) {
        Ok(bytes) => bytes,
        Err(e) => {
            folio_logger::error(format!("Failed to decode theme from URL: {}", e));
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(json) => import_theme(&json),
        Err(e) => {
            folio_logger::error(format!("Failed to decode theme from URL: {}", e));
            None
        }
    }
}

/// The parts of a page URL that sharing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// `scheme://host[:port]`
    pub origin: String,
    /// Always starts with `/`
    pub pathname: String,
    /// Empty, or starts with `?`
    pub search: String,
}

impl PageLocation {
    /// Split an absolute URL. The fragment is dropped.
    pub fn parse(url: &str) -> Option<Self> {
        let (scheme, rest) = url.trim().split_once("://")?;
        let scheme_ok = scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
        if scheme.is_empty() || !scheme_ok {
            return None;
        }

        let rest = rest.split('#').next().unwrap_or_default();
        let host_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let (host, tail) = rest.split_at(host_end);
        if host.is_empty() {
            return None;
        }

        let (path, search) = match tail.find('?') {
            Some(i) => tail.split_at(i),
            None => (tail, ""),
        };
        let pathname = if path.is_empty() { "/" } else { path };
        // A bare `?` is no query at all
        let search = if search == "?" { "" } else { search };

        Some(Self {
            origin: format!("{}://{}", scheme.to_ascii_lowercase(), host),
            pathname: pathname.to_string(),
            search: search.to_string(),
        })
    }

    /// First value of query parameter `name`, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.search
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| percent_decode(key) == name)
            .map(|(_, value)| percent_decode(value))
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.origin, self.pathname, self.search)
    }
}

// Form-style decoding: `+` is a space, malformed escapes pass through
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_value(bytes[i + 1]) << 4 | hex_value(bytes[i + 2]));
                i += 3;
                continue;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// `origin + pathname + "?customTheme=" + encoded theme`.
pub fn create_theme_share_url(theme: &ThemeConfig, location: &PageLocation) -> String {
    format!(
        "{}{}?{}={}",
        location.origin,
        location.pathname,
        CUSTOM_THEME_PARAM,
        encode_theme_for_url(theme)
    )
}

/// Theme id requested through `?theme=`.
pub fn get_theme_from_url(location: &PageLocation) -> Option<String> {
    location.query_param(THEME_PARAM)
}

/// Theme carried by `?customTheme=`, if present and decodable.
pub fn get_custom_theme_from_url(location: &PageLocation) -> Option<ThemeConfig> {
    let encoded = location.query_param(CUSTOM_THEME_PARAM)?;
    if encoded.is_empty() {
        return None;
    }
    decode_theme_from_url(&encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_theme::get_theme_by_id;

    fn sunset() -> ThemeConfig {
        get_theme_by_id("sunset-orange").unwrap().clone()
    }

    #[test]
    fn test_export_is_pretty_camel_case() {
        let json = export_theme(&sunset());
        assert!(json.starts_with("{\n  \"id\": \"sunset-orange\""));
        assert!(json.contains("\"primaryForeground\""));
        assert!(!json.contains("\"fonts\""));
        assert_eq!(import_theme(&json), Some(sunset()));
    }

    #[test]
    fn test_import_requires_shape() {
        assert_eq!(import_theme("not json"), None);
        assert_eq!(import_theme(r#"{"id":"x","name":"X"}"#), None);
        assert_eq!(import_theme(r#"{"id":"","name":"X","colors":{}}"#), None);
        assert_eq!(import_theme(r#"{"id":"x","name":"X","colors":[]}"#), None);

        // Shape is enough; color grammar is not checked
        let theme = import_theme(r#"{"id":"x","name":"X","colors":{"primary":"blue"}}"#).unwrap();
        assert_eq!(theme.colors.primary, "blue");
        assert_eq!(theme.colors.background, "");
        assert!(!folio_theme::validate_theme(&theme).valid);
    }

    #[test]
    fn test_url_encoding_round_trip() {
        let mut theme = sunset();
        theme.name = "Sünset ✦".into();
        let encoded = encode_theme_for_url(&theme);
        assert!(!encoded.contains(['+', '/', '=']));
        assert_eq!(decode_theme_from_url(&encoded), Some(theme.clone()));

        // Padded input still decodes
        let padded = format!("{}==", encoded);
        assert_eq!(decode_theme_from_url(&padded), Some(theme));
    }

    #[test]
    fn test_decode_garbage() {
        assert_eq!(decode_theme_from_url("!!!"), None);
        assert_eq!(decode_theme_from_url(&URL_SAFE_NO_PAD.encode("[1,2]")), None);
    }

    #[test]
    fn test_page_location_parse() {
        let loc = PageLocation::parse("https://example.com:8080/themes/?theme=dark#top").unwrap();
        assert_eq!(loc.origin, "https://example.com:8080");
        assert_eq!(loc.pathname, "/themes/");
        assert_eq!(loc.search, "?theme=dark");
        assert_eq!(loc.to_string(), "https://example.com:8080/themes/?theme=dark");

        let bare = PageLocation::parse("http://localhost:3000").unwrap();
        assert_eq!(bare.pathname, "/");
        assert_eq!(bare.search, "");

        assert_eq!(PageLocation::parse("/relative/path"), None);
        assert_eq!(PageLocation::parse("https:///nohost"), None);
    }

    #[test]
    fn test_query_params() {
        let loc = PageLocation::parse("http://x.dev/?a=1&theme=ocean%2Dbreeze&theme=dark&q=a+b").unwrap();
        assert_eq!(get_theme_from_url(&loc).as_deref(), Some("ocean-breeze"));
        assert_eq!(loc.query_param("q").as_deref(), Some("a b"));
        assert_eq!(loc.query_param("missing"), None);
        assert_eq!(get_custom_theme_from_url(&loc), None);
    }

    #[test]
    fn test_share_url_round_trip() {
        let loc = PageLocation::parse("https://site.dev/portfolio?theme=light").unwrap();
        let url = create_theme_share_url(&sunset(), &loc);
        assert!(url.starts_with("https://site.dev/portfolio?customTheme="));

        let shared = PageLocation::parse(&url).unwrap();
        assert_eq!(get_custom_theme_from_url(&shared), Some(sunset()));
        assert_eq!(get_theme_from_url(&shared), None);
    }
}
