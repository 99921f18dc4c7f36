//! Declarative request validation
//!
//! Each resource declares a schema: an ordered list of fields, each with an
//! ordered list of constraints. Validation walks the raw JSON payload so that
//! presence and type failures are reported per field, and it accumulates every
//! failed rule instead of short-circuiting. The result is the wire-level
//! `errors` map: field name to the list of messages for that field.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;

/// Date format accepted for `fechaNacimiento`.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// A single validation rule for one field.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Value must be a JSON string.
    StringType,
    /// Value must be a JSON integer that fits the stored column.
    IntegerType,
    /// String length in characters, inclusive bounds.
    Length { min: usize, max: usize },
    /// String must parse as a calendar date in `YYYY-MM-DD` form.
    Date,
    /// String must equal one of the listed values.
    OneOf(&'static [&'static str]),
    /// String must consist of exactly `n` ASCII digits.
    Digits(usize),
    /// String must look like an email address.
    Email,
}

impl Constraint {
    /// Check one rule against a present value. Returns the failure message,
    /// if any. String-shaped rules pass on non-string values; `StringType`
    /// already reported those.
    fn check(&self, value: &Value) -> Option<String> {
        match self {
            Constraint::StringType => {
                if value.is_string() {
                    None
                } else {
                    Some("must be a string".to_string())
                }
            }
            Constraint::IntegerType => {
                let fits = value.as_i64().is_some_and(|n| i32::try_from(n).is_ok());
                if fits {
                    None
                } else {
                    Some("must be an integer".to_string())
                }
            }
            Constraint::Length { min, max } => {
                let s = value.as_str()?;
                let len = s.chars().count();
                if len >= *min && len <= *max {
                    None
                } else {
                    Some(format!("must be between {} and {} characters", min, max))
                }
            }
            Constraint::Date => {
                let s = value.as_str()?;
                if NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok() {
                    None
                } else {
                    Some("must be a valid date in YYYY-MM-DD format".to_string())
                }
            }
            Constraint::OneOf(options) => {
                let s = value.as_str()?;
                if options.contains(&s) {
                    None
                } else {
                    Some(format!("must be one of: {}", options.join(", ")))
                }
            }
            Constraint::Digits(n) => {
                let s = value.as_str()?;
                if s.len() == *n && s.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    Some(format!("must be exactly {} digits", n))
                }
            }
            Constraint::Email => {
                let s = value.as_str()?;
                if email_regex().is_match(s) {
                    None
                } else {
                    Some("must be a valid email address".to_string())
                }
            }
        }
    }
}

/// One field of a resource schema: wire name plus its ordered rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: &'static str,
    pub rules: &'static [Constraint],
}

/// Validation schema for the property resource.
pub const PROPERTY_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        field: "departamento",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 30 }],
    },
    FieldSpec {
        field: "municipio",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 30 }],
    },
    FieldSpec {
        field: "residencia",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 30 }],
    },
    FieldSpec {
        field: "calle",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 30 }],
    },
    FieldSpec {
        field: "poligono",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 15 }],
    },
    FieldSpec {
        field: "numeroCasa",
        rules: &[Constraint::IntegerType],
    },
    FieldSpec {
        field: "idPropietario",
        rules: &[Constraint::IntegerType],
    },
];

/// Validation schema for the owner resource.
pub const OWNER_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        field: "nombres",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 30 }],
    },
    FieldSpec {
        field: "apellidos",
        rules: &[Constraint::StringType, Constraint::Length { min: 1, max: 30 }],
    },
    FieldSpec {
        field: "fechaNacimiento",
        rules: &[Constraint::StringType, Constraint::Date],
    },
    FieldSpec {
        field: "genero",
        rules: &[
            Constraint::StringType,
            Constraint::Length { min: 1, max: 1 },
            Constraint::OneOf(&["M", "F"]),
        ],
    },
    FieldSpec {
        field: "telefono",
        rules: &[
            Constraint::StringType,
            Constraint::Length { min: 8, max: 8 },
            Constraint::Digits(8),
        ],
    },
    FieldSpec {
        field: "email",
        rules: &[Constraint::StringType, Constraint::Email],
    },
];

/// Accumulated validation failures, keyed by wire field name.
///
/// Entries keep schema order; serializes as the wire `errors` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: String) {
        if let Some((_, messages)) = self.entries.iter_mut().find(|(f, _)| f == field) {
            messages.push(message);
        } else {
            self.entries.push((field.to_string(), vec![message]));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages recorded for one field, if any.
    pub fn messages_for(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.entries {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{} {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validate a raw JSON payload against a resource schema.
///
/// Every failed rule is reported; a missing or null field reports only
/// "is required" and skips its remaining rules.
pub fn check(schema: &[FieldSpec], payload: &Value) -> crate::Result<()> {
    let mut errors = ValidationErrors::default();

    let Some(object) = payload.as_object() else {
        errors.push("body", "must be a JSON object".to_string());
        return Err(Error::Validation(errors));
    };

    for spec in schema {
        match object.get(spec.field) {
            None | Some(Value::Null) => {
                errors.push(spec.field, "is required".to_string());
            }
            Some(value) => {
                for rule in spec.rules {
                    if let Some(message) = rule.check(value) {
                        errors.push(spec.field, message);
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}
