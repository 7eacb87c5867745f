//! Validation rules for text entered into inputs.
//!
//! Rules are attached per field (a table column, a login form field) and run
//! when a value is committed. The first failing rule's message is reported.
//!
//! # Example
//!
//! ```
//! use pagewidgets::validation::Rules;
//!
//! let rules = Rules::new()
//!     .required("Servings are required")
//!     .numeric("Servings must be a number");
//!
//! assert!(rules.check("12").is_ok());
//! assert_eq!(rules.check("a dozen").unwrap_err(), "Servings must be a number");
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::error::FieldValidationError;

/// Type alias for validation rule closures.
type Rule = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// An ordered set of validation rules for one field.
#[derive(Clone, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom validation rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.rules
            .push(Arc::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Require the value to be non-empty.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require the value to consist of ASCII digits only.
    pub fn numeric(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: Regex, msg: impl Into<String>) -> Self {
        self.rule(move |v| pattern.is_match(v), msg)
    }

    /// Require a valid email address. Empty values pass; combine with
    /// [`required`](Self::required) for non-empty.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    /// Run the rules, returning the first failure message.
    pub fn check(&self, value: &str) -> Result<(), String> {
        self.rules.iter().try_for_each(|rule| rule(value))
    }

    /// Run the rules for `field`, producing a structured error.
    pub fn validate(&self, field: &str, value: &str) -> Result<(), FieldValidationError> {
        self.check(value)
            .map_err(|message| FieldValidationError::new(field, value, message))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("rule_count", &self.rules.len())
            .finish()
    }
}
