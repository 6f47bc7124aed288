//! Recognized string formats

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

static EMAIL: OnceLock<Regex> = OnceLock::new();
static DATE: OnceLock<Regex> = OnceLock::new();

/// A format the validator knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
    Date,
    Url,
}

impl Format {
    /// Maps a schema `format` keyword. Unknown keywords (including
    /// `data-url`) are not checked.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "email" => Some(Format::Email),
            "date" => Some(Format::Date),
            "uri" | "url" => Some(Format::Url),
            _ => None,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Format::Email => email_regex().is_match(value),
            Format::Date => date_regex().is_match(value),
            // Url::parse rejects relative references
            Format::Url => Url::parse(value).is_ok(),
        }
    }
}

fn email_regex() -> &'static Regex {
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email format regex is valid")
    })
}

fn date_regex() -> &'static Regex {
    DATE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date format regex is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Format::parse("email"), Some(Format::Email));
        assert_eq!(Format::parse("date"), Some(Format::Date));
        assert_eq!(Format::parse("uri"), Some(Format::Url));
        assert_eq!(Format::parse("url"), Some(Format::Url));
        assert_eq!(Format::parse("data-url"), None);
        assert_eq!(Format::parse("phone"), None);
    }

    #[test]
    fn test_email() {
        assert!(Format::Email.matches("a@b.com"));
        assert!(!Format::Email.matches("not-an-email"));
        assert!(!Format::Email.matches("a b@c.com"));
        assert!(!Format::Email.matches("a@b"));
    }

    #[test]
    fn test_date_is_shape_only() {
        assert!(Format::Date.matches("2024-02-29"));
        assert!(!Format::Date.matches("29/02/2024"));
        assert!(!Format::Date.matches("2024-2-9"));
    }

    #[test]
    fn test_url_must_be_absolute() {
        assert!(Format::Url.matches("https://example.com/path?q=1"));
        assert!(Format::Url.matches("mailto:someone@example.com"));
        assert!(!Format::Url.matches("/relative/path"));
        assert!(!Format::Url.matches("example.com"));
    }
}
