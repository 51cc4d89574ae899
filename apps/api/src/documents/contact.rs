//! First e-mail address and phone number found in résumé text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3})?\s*\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("valid phone regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE.find(text).map(|m| m.as_str().trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_email_and_phone() {
        let info = extract_contact_info(
            "Jane Doe\njane.doe+cv@example.co.uk | +1 (555) 123-4567\nPython, AWS",
        );
        assert_eq!(info.email.as_deref(), Some("jane.doe+cv@example.co.uk"));
        assert_eq!(info.phone.as_deref(), Some("+1 (555) 123-4567"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        assert_eq!(extract_contact_info("no contact here"), ContactInfo::default());
    }
}
