//! Rule primitives
//!
//! A [`Rule`] is a field path plus an ordered list of predicate/message
//! pairs. Evaluation stops at the first failing predicate for that field,
//! so each field reports at most one error. A [`RuleSet`] groups the rules
//! for one request part (body, query string or path).
//!
//! Field paths are dotted (`preferences.theme`). A `*` segment applies the
//! remaining path to every element of an array and reports failures as
//! `tags[2]`.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::todo::parse_due_date;
use crate::shared::{FieldError, FieldLocation};

pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("email regex")
});

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username regex"));

/// Validation for a single field path
pub struct Rule {
    field: &'static str,
    optional: bool,
    checks: Vec<(Predicate, &'static str)>,
}

impl Rule {
    /// Field must be present and non-null
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Field may be absent or `null`; checks run only when a value is given
    pub fn optional(field: &'static str) -> Self {
        Self {
            field,
            optional: true,
            checks: Vec::new(),
        }
    }

    /// Append a predicate; its message is reported if it is the first to fail
    pub fn check<F>(mut self, predicate: F, message: &'static str) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.checks.push((Box::new(predicate), message));
        self
    }

    fn first_failure(&self, value: &Value) -> Option<&'static str> {
        self.checks
            .iter()
            .find(|(predicate, _)| !predicate(value))
            .map(|(_, message)| *message)
    }

    fn missing_message(&self) -> &'static str {
        self.checks
            .first()
            .map(|(_, message)| *message)
            .unwrap_or("Field is required")
    }

    fn evaluate(&self, root: &Value, location: FieldLocation, errors: &mut Vec<FieldError>) {
        let segments: Vec<&str> = self.field.split('.').collect();
        self.walk(root, &segments, String::new(), location, errors);
    }

    fn walk(
        &self,
        current: &Value,
        segments: &[&str],
        path: String,
        location: FieldLocation,
        errors: &mut Vec<FieldError>,
    ) {
        let Some((head, rest)) = segments.split_first() else {
            self.apply(Some(current), path, location, errors);
            return;
        };

        if *head == "*" {
            if let Value::Array(items) = current {
                for (index, item) in items.iter().enumerate() {
                    self.walk(item, rest, format!("{}[{}]", path, index), location, errors);
                }
            }
            return;
        }

        let next_path = if path.is_empty() {
            head.to_string()
        } else {
            format!("{}.{}", path, head)
        };

        match current.get(*head) {
            Some(next) if !next.is_null() => self.walk(next, rest, next_path, location, errors),
            _ => self.apply(None, next_path, location, errors),
        }
    }

    fn apply(
        &self,
        value: Option<&Value>,
        path: String,
        location: FieldLocation,
        errors: &mut Vec<FieldError>,
    ) {
        let failure = match value {
            Some(value) if !value.is_null() => self.first_failure(value),
            _ if self.optional => None,
            _ => Some(self.missing_message()),
        };
        if let Some(message) = failure {
            errors.push(FieldError::new(path, message, location));
        }
    }
}

/// Ordered rules for one part of the request
pub struct RuleSet {
    location: FieldLocation,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(location: FieldLocation, rules: Vec<Rule>) -> Self {
        Self { location, rules }
    }

    /// Every failure, in rule order
    pub fn validate(&self, input: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            rule.evaluate(input, self.location, &mut errors);
        }
        errors
    }

    pub fn check(&self, input: &Value) -> Result<(), BackendError> {
        let errors = self.validate(input);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BackendError::validation(errors))
        }
    }
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// Length of the trimmed string, in characters, within `min..=max`
pub fn length(min: usize, max: usize) -> impl Fn(&Value) -> bool + Send + Sync {
    move |value| match value.as_str() {
        Some(text) => {
            let len = text.trim().chars().count();
            len >= min && len <= max
        }
        None => false,
    }
}

pub fn not_empty(value: &Value) -> bool {
    value.as_str().is_some_and(|text| !text.trim().is_empty())
}

pub fn one_of(allowed: &'static [&'static str]) -> impl Fn(&Value) -> bool + Send + Sync {
    move |value| value.as_str().is_some_and(|text| allowed.contains(&text))
}

pub fn email(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|text| EMAIL_REGEX.is_match(text.trim()))
}

pub fn username(value: &Value) -> bool {
    value.as_str().is_some_and(|text| USERNAME_REGEX.is_match(text.trim()))
}

pub fn boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// `"true"` / `"false"` as found in a query string
pub fn boolean_text(value: &Value) -> bool {
    matches!(value.as_str(), Some("true") | Some("false"))
}

/// Decimal integer (as JSON number or query-string text) within `min..=max`
pub fn integer_in(min: i64, max: i64) -> impl Fn(&Value) -> bool + Send + Sync {
    move |value| {
        let parsed = match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.is_some_and(|n| n >= min && n <= max)
    }
}

/// RFC 3339 timestamp or `YYYY-MM-DD`
pub fn iso_date(value: &Value) -> bool {
    value.as_str().is_some_and(|text| parse_due_date(text.trim()).is_some())
}

pub fn future_date(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|text| parse_due_date(text.trim()))
        .is_some_and(|due| due > Utc::now())
}

pub fn array(value: &Value) -> bool {
    value.is_array()
}

pub fn object(value: &Value) -> bool {
    value.is_object()
}

pub fn uuid(value: &Value) -> bool {
    value.as_str().is_some_and(|text| Uuid::parse_str(text).is_ok())
}
