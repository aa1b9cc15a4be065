//! Schema and record types.
//!
//! A [`Schema`] is the fixed, ordered field set of one store. A [`Record`]
//! holds exactly one value per schema field, in schema order. Records are
//! built from loose `field → value` pairs: values are trimmed, fields that
//! were not supplied become empty strings, and keys outside the schema are
//! dropped.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// Default field set used by the product form.
pub const DEFAULT_FIELDS: [&str; 4] = ["Produkt", "Preis", "Region", "Link"];

// ============================================================================
// Schema
// ============================================================================

/// Ordered, fixed set of field names for one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    /// Build a schema from field names.
    ///
    /// Names are trimmed. The list must be non-empty, contain no blank
    /// names, and contain no duplicates (compared case-insensitively, since
    /// form keys are matched that way).
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<String> = fields
            .into_iter()
            .map(|f| f.as_ref().trim().to_string())
            .collect();

        if fields.is_empty() {
            return Err(Error::schema("a schema needs at least one field"));
        }
        for (i, field) in fields.iter().enumerate() {
            if field.is_empty() {
                return Err(Error::schema(format!("field #{} has an empty name", i + 1)));
            }
            if fields[..i].iter().any(|f| f.eq_ignore_ascii_case(field)) {
                return Err(Error::schema(format!("duplicate field '{field}'")));
            }
        }

        Ok(Self { fields })
    }

    /// Field names in header order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`; construction rejects empty schemas.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a field, matched exactly first, then case-insensitively.
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.fields
            .iter()
            .position(|f| f == name)
            .or_else(|| self.fields.iter().position(|f| f.eq_ignore_ascii_case(name)))
    }

    /// Canonical spelling of a field name, if it belongs to the schema.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.fields[i].as_str())
    }

    /// Returns `true` if `name` resolves to a schema field.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Build a record from loose `field → value` pairs.
    ///
    /// Values are trimmed. Unknown keys are ignored; later duplicates of the
    /// same field overwrite earlier ones.
    pub fn record<I, K, V>(&self, values: I) -> Record
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut out = vec![String::new(); self.fields.len()];
        for (key, value) in values {
            match self.position(key.as_ref()) {
                Some(i) => out[i] = value.as_ref().trim().to_string(),
                None => log::debug!("ignoring field '{}' not in schema", key.as_ref()),
            }
        }
        Record {
            fields: self.fields.clone(),
            values: out,
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// One stored row: exactly one trimmed value per schema field.
///
/// Serializes as a map keyed by the lower-cased field names, in schema
/// order, which is the shape the view layer consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
    values: Vec<String>,
}

impl Record {
    /// Value of a field (matched case-insensitively).
    pub fn get(&self, field: &str) -> Option<&str> {
        let field = field.trim();
        self.fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case(field))
            .map(|i| self.values[i].as_str())
    }

    /// Values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Field names in schema order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(&field.to_lowercase(), value)?;
        }
        map.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
