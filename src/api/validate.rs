//! Request validation.
//!
//! Each failed rule becomes a [`Violation`] naming the field, the rule tag
//! (`required`, `min`, `max`, `email`, `gte`, `lte`) and the offending
//! value, so a handler can return every problem at once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::models::{NewUser, UserUpdate};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const AGE_MIN: i64 = 0;
pub const AGE_MAX: i64 = 120;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern: {e}"));
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub tag: String,
    pub value: String,
}

impl Violation {
    fn new(field: &str, tag: &str, value: impl ToString) -> Self {
        Violation {
            field: field.to_string(),
            tag: tag.to_string(),
            value: value.to_string(),
        }
    }
}

pub trait Validate {
    fn violations(&self) -> Vec<Violation>;

    fn validate(&self) -> Result<(), Vec<Violation>> {
        let found = self.violations();
        if found.is_empty() {
            Ok(())
        } else {
            Err(found)
        }
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn check_name(name: &str, out: &mut Vec<Violation>) {
    let len = name.trim().chars().count();
    if len == 0 {
        out.push(Violation::new("name", "required", name));
    } else if len < NAME_MIN {
        out.push(Violation::new("name", "min", name));
    } else if len > NAME_MAX {
        out.push(Violation::new("name", "max", name));
    }
}

fn check_email(email: &str, out: &mut Vec<Violation>) {
    if email.trim().is_empty() {
        out.push(Violation::new("email", "required", email));
    } else if email.chars().count() > EMAIL_MAX {
        out.push(Violation::new("email", "max", email));
    } else if !is_email(email) {
        out.push(Violation::new("email", "email", email));
    }
}

fn check_age(age: i64, out: &mut Vec<Violation>) {
    if age < AGE_MIN {
        out.push(Violation::new("age", "gte", age));
    } else if age > AGE_MAX {
        out.push(Violation::new("age", "lte", age));
    }
}

impl Validate for NewUser {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        check_name(&self.name, &mut out);
        check_email(&self.email, &mut out);
        out
    }
}

impl Validate for UserUpdate {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut out);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut out);
        }
        out
    }
}

/// Sign-up form used by the validation lesson.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

impl Validate for Registration {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        check_name(&self.name, &mut out);
        check_email(&self.email, &mut out);
        if let Some(age) = self.age {
            check_age(age, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(violations: &[Violation]) -> Vec<(&str, &str)> {
        violations
            .iter()
            .map(|v| (v.field.as_str(), v.tag.as_str()))
            .collect()
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("a.b+tag@mail.example.org"));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@localhost"));
        assert!(!is_email("al ice@example.com"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn test_valid_new_user() {
        assert!(NewUser::new("Alice", "alice@example.com").validate().is_ok());
    }

    #[test]
    fn test_new_user_reports_every_field() {
        let err = NewUser::new("", "nope").validate().unwrap_err();
        assert_eq!(tags(&err), vec![("name", "required"), ("email", "email")]);
        assert_eq!(err[1].value, "nope");
    }

    #[test]
    fn test_name_length_bounds() {
        let short = NewUser::new("A", "a@example.com").violations();
        assert_eq!(tags(&short), vec![("name", "min")]);

        let long = NewUser::new(&"x".repeat(NAME_MAX + 1), "a@example.com").violations();
        assert_eq!(tags(&long), vec![("name", "max")]);

        let edge = NewUser::new(&"x".repeat(NAME_MAX), "a@example.com");
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_email_length_bound() {
        let local = "a".repeat(EMAIL_MAX - "@example.com".len());
        let edge = format!("{}@example.com", local);
        assert!(NewUser::new("Al", &edge).validate().is_ok());

        let long = format!("x{}", edge);
        assert_eq!(tags(&NewUser::new("Al", &long).violations()), vec![("email", "max")]);
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        assert!(UserUpdate::default().validate().is_ok());
        let update = UserUpdate {
            name: None,
            email: Some("broken".to_string()),
        };
        assert_eq!(tags(&update.violations()), vec![("email", "email")]);
    }

    #[test]
    fn test_registration_age_bounds() {
        let mut form = Registration {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            age: None,
        };
        assert!(form.validate().is_ok());

        form.age = Some(121);
        assert_eq!(tags(&form.violations()), vec![("age", "lte")]);
        form.age = Some(-1);
        assert_eq!(tags(&form.violations()), vec![("age", "gte")]);
        form.age = Some(120);
        assert!(form.validate().is_ok());
    }
}
