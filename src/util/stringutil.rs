/// Reverses by `char`, so multi-byte characters survive intact.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

/// Ignores case and anything that is not a letter or digit.
pub fn is_palindrome(s: &str) -> bool {
    let cleaned = normalize(s);
    cleaned.iter().eq(cleaned.iter().rev())
}

fn normalize(s: &str) -> Vec<char> {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("hello"), "olleh");
        assert_eq!(reverse("héllo"), "olléh");
        assert_eq!(reverse(""), "");
    }

    #[test]
    fn test_to_upper() {
        assert_eq!(to_upper("rust"), "RUST");
    }

    #[test]
    fn test_palindrome() {
        assert!(is_palindrome("racecar"));
        assert!(is_palindrome("A man, a plan, a canal: Panama"));
        assert!(is_palindrome(""));
        assert!(!is_palindrome("hello"));
    }
}
