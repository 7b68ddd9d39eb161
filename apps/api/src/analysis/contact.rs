use crate::analysis::patterns::PatternSet;

/// First-line names at or above this many characters are rejected.
const MAX_NAME_CHARS: usize = 40;

/// Contact fields. An empty string means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Extracts name, email and phone.
///
/// Email and phone are the first match of their patterns anywhere in the text. The name is the
/// trimmed first line, kept only if it is short and is not itself an email or phone number.
pub fn extract_contact_info(text: &str, patterns: &PatternSet) -> ContactInfo {
    let first_match = |re: &regex::Regex| {
        re.find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    let first_line = text.split('\n').next().unwrap_or_default().trim();
    let name = if first_line.chars().count() < MAX_NAME_CHARS
        && !patterns.email.is_match(first_line)
        && !patterns.phone.is_match(first_line)
    {
        first_line.to_string()
    } else {
        String::new()
    };

    ContactInfo {
        name,
        email: first_match(&patterns.email),
        phone: first_match(&patterns.phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> ContactInfo {
        extract_contact_info(text, &PatternSet::default())
    }

    #[test]
    fn test_full_header() {
        let info = extract("Jane Doe\nEmail: jane@x.com\nPhone: 555-123-4567\n");
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.email, "jane@x.com");
        assert_eq!(info.phone, "555-123-4567");
    }

    #[test]
    fn test_empty_text_is_all_empty() {
        assert_eq!(extract(""), ContactInfo::default());
    }

    #[test]
    fn test_first_email_wins() {
        let info = extract("A\nfirst@one.org second@two.org");
        assert_eq!(info.email, "first@one.org");
    }

    #[test]
    fn test_phone_with_country_code_and_parens() {
        let info = extract("John Smith\n+1 (555) 987.6543");
        assert_eq!(info.phone, "+1 (555) 987.6543");
    }

    #[test]
    fn test_first_line_email_is_not_a_name() {
        let info = extract("jane@x.com\nJane Doe");
        assert_eq!(info.name, "");
        assert_eq!(info.email, "jane@x.com");
    }

    #[test]
    fn test_first_line_phone_is_not_a_name() {
        assert_eq!(extract("555.123.4567\nJane").name, "");
    }

    #[test]
    fn test_long_first_line_is_not_a_name() {
        let info = extract("Curriculum Vitae of a very experienced software engineer\nJane");
        assert_eq!(info.name, "");
    }

    #[test]
    fn test_first_line_is_trimmed() {
        assert_eq!(extract("   Jane Doe  \r\nrest").name, "Jane Doe");
    }

    #[test]
    fn test_name_only_considers_first_line() {
        let info = extract("\nJane Doe");
        assert_eq!(info.name, "");
    }
}
