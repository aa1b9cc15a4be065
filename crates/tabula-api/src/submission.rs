//! Submission validation.
//!
//! A [`SubmissionPolicy`] turns raw form input into the `field → value`
//! pairs handed to the row store, or rejects it before anything is written.
//! Missing required fields always reject; nothing is ever stored with a
//! required field silently blank.

use std::collections::{BTreeMap, HashMap};

use tabula_core::{FormConfig, Schema};

/// Message shown when one or more required fields are blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Required fields absent or blank, in schema order.
    #[error("Please fill in all fields.")]
    MissingFields(Vec<String>),

    /// A numeric field did not parse as an integer.
    #[error("{field} must be a whole number, got '{value}'.")]
    NotANumber {
        /// Field that failed
        field: String,
        /// Value as submitted (trimmed)
        value: String,
    },
}

impl Rejection {
    /// Fields the rejection refers to.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Rejection::MissingFields(fields) => fields.iter().map(String::as_str).collect(),
            Rejection::NotANumber { field, .. } => vec![field.as_str()],
        }
    }
}

/// Required/numeric/derived rules for one schema.
#[derive(Debug, Clone)]
pub struct SubmissionPolicy {
    schema: Schema,
    required: Vec<String>,
    numeric: Vec<String>,
    derived: Vec<(String, String)>,
}

impl SubmissionPolicy {
    /// A policy with no rules: every submission is accepted.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            required: Vec::new(),
            numeric: Vec::new(),
            derived: Vec::new(),
        }
    }

    /// Build from the `[form]` config section.
    ///
    /// Names that are not schema fields are dropped; config validation
    /// reports them before this point.
    pub fn from_config(schema: Schema, form: &FormConfig) -> Self {
        let mut policy = Self::new(schema);
        for field in &form.required {
            policy = policy.with_required(field);
        }
        for field in &form.numeric {
            policy = policy.with_numeric(field);
        }
        for (target, source) in &form.derived {
            policy = policy.with_derived(target, source);
        }
        policy
    }

    /// Mark a field as required.
    pub fn with_required(mut self, field: &str) -> Self {
        if let Some(name) = self.canonical(field) {
            self.required.push(name);
        }
        self
    }

    /// Require a field's value, when present, to parse as an integer.
    pub fn with_numeric(mut self, field: &str) -> Self {
        if let Some(name) = self.canonical(field) {
            self.numeric.push(name);
        }
        self
    }

    /// Fill `target` from `source` when `target` is not submitted.
    pub fn with_derived(mut self, target: &str, source: &str) -> Self {
        if let (Some(target), Some(source)) = (self.canonical(target), self.canonical(source)) {
            self.derived.push((target, source));
        }
        self
    }

    /// Schema the policy validates against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Required field names in declaration order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Numeric field names in declaration order.
    pub fn numeric(&self) -> &[String] {
        &self.numeric
    }

    /// Validate raw form input.
    ///
    /// Form keys match schema fields case-insensitively; unknown keys are
    /// ignored. Returns trimmed `(field, value)` pairs in schema order.
    pub fn validate(
        &self,
        form: &HashMap<String, String>,
    ) -> Result<Vec<(String, String)>, Rejection> {
        let mut values: BTreeMap<usize, String> = BTreeMap::new();
        for (key, value) in form {
            if let Some(i) = self.schema.position(key) {
                let value = value.trim();
                if !value.is_empty() {
                    values.insert(i, value.to_string());
                }
            }
        }

        for (target, source) in &self.derived {
            let (Some(t), Some(s)) = (self.schema.position(target), self.schema.position(source))
            else {
                continue;
            };
            if !values.contains_key(&t) {
                if let Some(value) = values.get(&s).cloned() {
                    values.insert(t, value);
                }
            }
        }

        let mut missing: Vec<(usize, String)> = self
            .required
            .iter()
            .filter_map(|f| self.schema.position(f).map(|i| (i, f.clone())))
            .filter(|(i, _)| !values.contains_key(i))
            .collect();
        if !missing.is_empty() {
            missing.sort_by_key(|(i, _)| *i);
            missing.dedup();
            return Err(Rejection::MissingFields(
                missing.into_iter().map(|(_, f)| f).collect(),
            ));
        }

        for field in &self.numeric {
            let Some(value) = self.schema.position(field).and_then(|i| values.get(&i)) else {
                continue;
            };
            if !is_integer(value) {
                return Err(Rejection::NotANumber {
                    field: field.clone(),
                    value: value.clone(),
                });
            }
        }

        Ok(values
            .into_iter()
            .map(|(i, value)| (self.schema.fields()[i].clone(), value))
            .collect())
    }

    fn canonical(&self, field: &str) -> Option<String> {
        let name = self.schema.resolve(field).map(str::to_string);
        if name.is_none() {
            tracing::warn!(field, "form rule names a field outside the schema");
        }
        name
    }
}

/// An optional `+` or `-` followed by one or more ASCII digits, of any length.
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Tests
// ============================================================================
