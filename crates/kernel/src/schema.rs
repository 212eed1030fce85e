//! Declarative per-field validation rules for catalog forms.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s. Form input is always
//! text; validation parses each field according to its [`FieldKind`] and
//! produces the JSON payload the backend expects.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Raw text input keyed by wire key.
pub type FormValues = BTreeMap<&'static str, String>;

/// Calendar year used for year bounds and create-mode defaults.
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Counts and years; coerced to a JSON integer.
    Integer,
    /// Prices; coerced to a JSON float.
    Decimal,
    Flag,
}

/// Numeric bound, either fixed or relative to the current year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    Value(f64),
    CurrentYearPlus(i32),
}

impl Limit {
    fn resolve(self, current_year: i32) -> f64 {
        match self {
            Limit::Value(v) => v,
            Limit::CurrentYearPlus(offset) => f64::from(current_year + offset),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Value(v) => write!(f, "{}", v),
            Limit::CurrentYearPlus(offset) => write!(f, "current year + {}", offset),
        }
    }
}

/// Value a field takes when a create form opens, or when an edited entity
/// has no value for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Empty,
    Text(&'static str),
    CurrentYear,
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// JSON key on the wire.
    pub key: &'static str,
    /// snake_case alias accepted on input.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_len: Option<usize>,
    pub min: Option<(Limit, &'static str)>,
    pub max: Option<(Limit, &'static str)>,
    pub default: FieldDefault,
}

impl FieldSpec {
    fn new(key: &'static str, name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            name,
            label,
            kind,
            required: false,
            max_len: None,
            min: None,
            max: None,
            default: FieldDefault::Empty,
        }
    }

    pub fn text(key: &'static str, name: &'static str, label: &'static str) -> Self {
        Self::new(key, name, label, FieldKind::Text)
    }

    pub fn integer(key: &'static str, name: &'static str, label: &'static str) -> Self {
        Self::new(key, name, label, FieldKind::Integer)
    }

    pub fn decimal(key: &'static str, name: &'static str, label: &'static str) -> Self {
        Self::new(key, name, label, FieldKind::Decimal)
    }

    /// Boolean switch; defaults to `true`.
    pub fn flag(key: &'static str, name: &'static str, label: &'static str) -> Self {
        Self::new(key, name, label, FieldKind::Flag).default_value(FieldDefault::Flag(true))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn min(mut self, min: f64, message: &'static str) -> Self {
        self.min = Some((Limit::Value(min), message));
        self
    }

    pub fn max(mut self, max: f64, message: &'static str) -> Self {
        self.max = Some((Limit::Value(max), message));
        self
    }

    /// Upper bound of `current_year + offset`.
    pub fn max_years_ahead(mut self, offset: i32, message: &'static str) -> Self {
        self.max = Some((Limit::CurrentYearPlus(offset), message));
        self
    }

    pub fn default_value(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    /// Short rule list for help output, e.g. `required, whole number, >= 1`.
    pub fn rules(&self) -> Vec<String> {
        let mut rules = Vec::new();
        if self.required {
            rules.push("required".to_string());
        }
        let kind = match self.kind {
            FieldKind::Text => "text",
            FieldKind::Integer => "whole number",
            FieldKind::Decimal => "number",
            FieldKind::Flag => "yes/no",
        };
        rules.push(kind.to_string());
        if let Some(max) = self.max_len {
            rules.push(format!("max {} chars", max));
        }
        if let Some((limit, _)) = self.min {
            rules.push(format!(">= {}", limit));
        }
        if let Some((limit, _)) = self.max {
            rules.push(format!("<= {}", limit));
        }
        rules
    }

    pub fn default_text(&self, current_year: i32) -> String {
        match self.default {
            FieldDefault::Empty => String::new(),
            FieldDefault::Text(text) => text.to_string(),
            FieldDefault::CurrentYear => current_year.to_string(),
            FieldDefault::Flag(flag) => flag.to_string(),
        }
    }

    /// Parse one raw input into its payload value.
    pub fn check(&self, raw: &str, current_year: i32) -> Result<Value, String> {
        let trimmed = raw.trim();

        if trimmed.is_empty() && self.kind != FieldKind::Flag {
            return if self.required {
                Err(format!("{} is required", self.label))
            } else {
                Ok(Value::Null)
            };
        }

        match self.kind {
            FieldKind::Text => {
                if let Some(max) = self.max_len {
                    if trimmed.chars().count() > max {
                        return Err(format!("at most {} characters", max));
                    }
                }
                Ok(Value::String(trimmed.to_string()))
            }
            FieldKind::Integer => {
                let number: i64 = trimmed
                    .parse()
                    .map_err(|_| format!("{} must be a whole number", self.label))?;
                let number = i32::try_from(number)
                    .map_err(|_| format!("{} is too large", self.label))?;
                self.check_range(f64::from(number), current_year)?;
                Ok(Value::from(number))
            }
            FieldKind::Decimal => {
                let number: f64 = trimmed
                    .parse()
                    .ok()
                    .filter(|n: &f64| n.is_finite())
                    .ok_or_else(|| format!("{} must be a number", self.label))?;
                self.check_range(number, current_year)?;
                Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{} must be a number", self.label))
            }
            FieldKind::Flag => {
                if trimmed.is_empty() {
                    let fallback = matches!(self.default, FieldDefault::Flag(true));
                    return Ok(Value::Bool(fallback));
                }
                parse_flag(trimmed)
                    .map(Value::Bool)
                    .ok_or_else(|| format!("{} must be yes or no", self.label))
            }
        }
    }

    fn check_range(&self, number: f64, current_year: i32) -> Result<(), String> {
        if let Some((limit, message)) = self.min {
            if number < limit.resolve(current_year) {
                return Err(message.to_string());
            }
        }
        if let Some((limit, message)) = self.max {
            if number > limit.resolve(current_year) {
                return Err(message.to_string());
            }
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Ordered field rules for one catalog kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look a field up by wire key or snake_case name.
    pub fn field(&self, key_or_name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|field| field.key == key_or_name || field.name == key_or_name)
    }

    /// Create-mode values.
    pub fn defaults(&self, current_year: i32) -> FormValues {
        self.fields
            .iter()
            .map(|field| (field.key, field.default_text(current_year)))
            .collect()
    }

    /// Validate every field and build the request payload.
    ///
    /// All errors are collected so each offending field can be flagged at
    /// once. Fields missing from `values` are treated as empty input.
    pub fn validate(
        &self,
        values: &FormValues,
        current_year: i32,
    ) -> Result<Map<String, Value>, ValidationErrors> {
        let mut payload = Map::new();
        let mut errors = Vec::new();

        for field in &self.fields {
            let raw = values.get(field.key).map(String::as_str).unwrap_or("");
            match field.check(raw, current_year) {
                Ok(value) => {
                    payload.insert(field.key.to_string(), value);
                }
                Err(message) => errors.push(FieldError {
                    field: field.key,
                    message,
                }),
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-scoped validation failures, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, error.field, error.message)?;
        }
        Ok(())
    }
}
