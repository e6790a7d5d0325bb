use regex::Regex;

/// Accepts Indian mobiles in the formats people actually type: optional
/// +91/91 prefix, spaces and dashes ignored.
pub fn validate_mobile(mobile: &str) -> bool {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    let national = digits.strip_prefix("91").filter(|rest| rest.len() == 10).unwrap_or(&digits);
    let re = Regex::new(r"^[6-9]\d{9}$").unwrap();
    re.is_match(national)
}

pub fn validate_email(email: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    re.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_formats() {
        assert!(validate_mobile("9876543210"));
        assert!(validate_mobile("+91 9876543210"));
        assert!(validate_mobile("91-98765-43210"));
        assert!(!validate_mobile("1234567890"));
        assert!(!validate_mobile("98765"));
    }

    #[test]
    fn email_formats() {
        assert!(validate_email("a@x.com"));
        assert!(!validate_email("not-an-email"));
    }
}
