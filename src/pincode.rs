/// Validate a destination pincode: exactly 6 ASCII digits after trimming.
///
/// Every pincode flowing into the transit-time query passes through here,
/// whether it came from the query string or from a geolocation provider.
pub fn valid_pincode(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_six_digits() {
        assert_eq!(valid_pincode("411005"), Some("411005".to_string()));
        assert_eq!(valid_pincode("000000"), Some("000000".to_string()));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(valid_pincode("  400001 "), Some("400001".to_string()));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(valid_pincode("41100"), None);
        assert_eq!(valid_pincode("4110055"), None);
    }

    #[test]
    fn test_rejects_non_digits() {
        assert_eq!(valid_pincode("41100a"), None);
        assert_eq!(valid_pincode("411 05"), None);
        assert_eq!(valid_pincode("41-005"), None);
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(valid_pincode(""), None);
        assert_eq!(valid_pincode("   "), None);
    }
}
