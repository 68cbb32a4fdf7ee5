use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    Digits(usize),
    Url,
}

impl Rule {
    /// Checks `value` exactly as it will be sent. Empty optional values are only rejected
    /// by `Required`, which also rejects whitespace.
    pub fn check(&self, value: &str) -> Option<String> {
        if let Rule::Required = self {
            return value
                .trim()
                .is_empty()
                .then(|| "This field is required.".into());
        }

        if value.is_empty() {
            return None;
        }

        match self {
            Rule::Required => None,
            Rule::Email => {
                let valid = EMAIL.as_ref().map(|re| re.is_match(value)).unwrap_or(false);
                (!valid).then(|| "Enter a valid email address.".into())
            }
            Rule::MinLength(n) => (value.chars().count() < *n)
                .then(|| format!("Must be at least {n} characters long.")),
            Rule::Digits(n) => {
                let valid = value.len() == *n && value.chars().all(|c| c.is_ascii_digit());
                (!valid).then(|| format!("Must be exactly {n} digits."))
            }
            Rule::Url => {
                let valid = reqwest::Url::parse(value)
                    .map(|u| matches!(u.scheme(), "http" | "https"))
                    .unwrap_or(false);
                (!valid).then(|| "Enter a full http(s) URL.".into())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

/// Deserializes a text field with surrounding whitespace removed, so that the value a
/// form validates is the value it sends.
pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Collects the first failing rule for each field.
#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, value: &str, rules: &[Rule]) -> Self {
        if let Some(message) = rules.iter().find_map(|rule| rule.check(value)) {
            self.errors.push(FieldError {
                field: name,
                message,
            });
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
