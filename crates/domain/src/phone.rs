const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Normalizes a raw phone number to E.164 (`+<country><national>`).
///
/// SMS providers require a country code prefix, while tenants enter
/// numbers in all kinds of local formats. Separators are stripped, an
/// international `00` prefix becomes `+`, and bare national numbers
/// get the given default country code with a single national trunk
/// `0` removed. Returns `None` when no plausible number remains, in
/// which case the SMS channel is simply skipped for that customer.
pub fn normalize_phone(raw: &str, default_country_code: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (has_plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = if has_plus {
        digits
    } else if let Some(rest) = digits.strip_prefix("00") {
        rest.to_string()
    } else {
        // National number: drop the trunk zero before prefixing
        let national = digits.strip_prefix('0').unwrap_or(&digits);
        format!("{}{}", default_country_code, national)
    };

    if !(MIN_DIGITS..=MAX_DIGITS).contains(&normalized.len()) {
        return None;
    }

    Some(format!("+{}", normalized))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_keeps_already_international_numbers() {
        assert_eq!(
            normalize_phone("+4791234567", "1"),
            Some("+4791234567".into())
        );
        assert_eq!(
            normalize_phone("+1 (555) 123-4567", "47"),
            Some("+15551234567".into())
        );
    }

    #[test]
    fn it_converts_double_zero_prefix() {
        assert_eq!(
            normalize_phone("004791234567", "1"),
            Some("+4791234567".into())
        );
    }

    #[test]
    fn it_prefixes_national_numbers_with_the_default_country_code() {
        assert_eq!(
            normalize_phone("555-123-4567", "1"),
            Some("+15551234567".into())
        );
        // UK style trunk zero is dropped
        assert_eq!(
            normalize_phone("07911 123456", "44"),
            Some("+447911123456".into())
        );
    }

    #[test]
    fn it_rejects_garbage() {
        assert_eq!(normalize_phone("", "1"), None);
        assert_eq!(normalize_phone("   ", "1"), None);
        assert_eq!(normalize_phone("call me maybe", "1"), None);
        assert_eq!(normalize_phone("12345", "1"), None);
        assert_eq!(normalize_phone("12345678901234567890", "1"), None);
    }
}
