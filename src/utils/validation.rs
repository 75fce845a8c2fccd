use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// local@domain.tld: no whitespace, a single `@`, a dot somewhere after it
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_password(password: &str) -> PasswordCheck {
    let rules: [(bool, &str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one number",
        ),
    ];

    let errors: Vec<String> = rules
        .iter()
        .filter(|(passed, _)| !passed)
        .map(|(_, message)| message.to_string())
        .collect();

    PasswordCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("demo@example.com"));
        assert!(validate_email("a.b@mail.co.uk"));
        assert!(!validate_email("demo@example"));
        assert!(!validate_email("demo example@x.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("a@b@c.com"));
        assert!(!validate_email("a@.com"));
    }

    #[test]
    fn email_accepts_any_dotted_domain() {
        assert!(validate_email("user@example.com."));
        assert!(validate_email("first+tag@sub.example.io"));
        assert!(!validate_email("user@examplecom"));
    }

    #[test]
    fn password_rules_report_in_order() {
        assert!(validate_password("Sup3rSecret").is_valid);

        let check = validate_password("abc");
        assert!(!check.is_valid);
        assert_eq!(
            check.errors,
            vec![
                "Password must be at least 8 characters long",
                "Password must contain at least one uppercase letter",
                "Password must contain at least one number",
            ]
        );
    }
}
