/// Returns true if the comma separated list in `field` contains an element that is exactly
/// `token` once spaces and tabs are trimmed from both ends of the element.
///
/// The comparison is case-sensitive and whole-element, so `"EMIGRANT, FOOD"` does not contain
/// `"EMI"`. A `None` or empty field never matches. A single trailing comma does not start an extra
/// element, but an empty element between two commas does, so `"a,,b"` contains `""`.
///
/// The list is scanned lazily; nothing is allocated.
pub fn has_token_exact(field: Option<&str>, token: &str) -> bool {
    let field = match field {
        Some(f) if !f.is_empty() => f,
        _ => return false,
    };
    let field = field.strip_suffix(',').unwrap_or(field);
    field
        .split(',')
        .map(|element| element.trim_matches(is_blank))
        .any(|element| element == token)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_token() {
        assert!(has_token_exact(Some("EMI, FOOD"), "EMI"));
        assert!(has_token_exact(Some("FOOD,EMI"), "EMI"));
        assert!(has_token_exact(Some("EMI"), "EMI"));
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        assert!(!has_token_exact(Some("EMIGRANT, FOOD"), "EMI"));
        assert!(!has_token_exact(Some("XEMI"), "EMI"));
        assert!(!has_token_exact(Some("EM"), "EMI"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!has_token_exact(Some("emi"), "EMI"));
        assert!(!has_token_exact(Some("Emi, food"), "EMI"));
    }

    #[test]
    fn test_missing_or_empty_field() {
        assert!(!has_token_exact(None, "EMI"));
        assert!(!has_token_exact(Some(""), "EMI"));
        assert!(!has_token_exact(Some(""), ""));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert!(has_token_exact(Some("  EMI  ,X"), "EMI"));
        assert!(has_token_exact(Some("X,\tEMI\t"), "EMI"));
        assert!(has_token_exact(Some("a, \t EMI \t ,b"), "EMI"));
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        assert!(!has_token_exact(Some("E MI"), "EMI"));
        assert!(has_token_exact(Some("car loan, x"), "car loan"));
    }

    #[test]
    fn test_only_spaces_and_tabs_are_trimmed() {
        assert!(!has_token_exact(Some("EMI\n,X"), "EMI"));
    }

    #[test]
    fn test_empty_token() {
        assert!(has_token_exact(Some("a,,b"), ""));
        assert!(has_token_exact(Some("a, ,b"), ""));
        assert!(has_token_exact(Some("   "), ""));
        assert!(has_token_exact(Some(","), ""));
        assert!(has_token_exact(Some("a,,"), ""));
        assert!(!has_token_exact(Some("a,b"), ""));
        assert!(!has_token_exact(Some("a,"), ""));
    }

    #[test]
    fn test_trailing_comma() {
        assert!(has_token_exact(Some("EMI,"), "EMI"));
        assert!(has_token_exact(Some("a, EMI ,"), "EMI"));
    }
}
