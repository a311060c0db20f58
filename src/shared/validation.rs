use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for item image URLs
    /// Either an absolute http(s) URL or a server-relative path (as returned by the upload endpoint)
    /// - Valid: "/uploads/0b7e.png", "https://cdn.example.com/a.jpg"
    /// - Invalid: "uploads/a.png", "ftp://host/a.png", "/uploads/a b.png", ""
    pub static ref IMAGE_URL_REGEX: Regex = Regex::new(r"^(?:https?://[^\s/]+(?:/\S*)?|/\S+)$").unwrap();
}

/// PostgreSQL text columns cannot hold NUL bytes, so reject them up front
pub fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("nul_character"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_no_nul() {
        assert!(validate_no_nul("iPhone 13 Pro").is_ok());
        assert!(validate_no_nul("").is_ok());
        assert!(validate_no_nul("pho\0ne").is_err());
    }

    #[test]
    fn test_image_url_regex_valid() {
        assert!(IMAGE_URL_REGEX.is_match("/uploads/0b7e8f.png"));
        assert!(IMAGE_URL_REGEX.is_match("https://cdn.example.com/a.jpg"));
        assert!(IMAGE_URL_REGEX.is_match("http://localhost:8000/uploads/x.webp"));
        assert!(IMAGE_URL_REGEX.is_match("https://example.com"));
    }

    #[test]
    fn test_image_url_regex_invalid() {
        assert!(!IMAGE_URL_REGEX.is_match("")); // empty
        assert!(!IMAGE_URL_REGEX.is_match("uploads/a.png")); // relative without slash
        assert!(!IMAGE_URL_REGEX.is_match("ftp://host/a.png")); // unsupported scheme
        assert!(!IMAGE_URL_REGEX.is_match("/uploads/a b.png")); // whitespace
        assert!(!IMAGE_URL_REGEX.is_match("/")); // bare root
    }
}
