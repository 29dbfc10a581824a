//! Flat company info record with "N/A" lookups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::frame::{format_number, group_thousands};

/// Placeholder rendered for absent fields.
pub const NA: &str = "N/A";

/// Key → value dictionary assembled from the provider's summary modules.
///
/// Keys follow the provider's camelCase names (`longName`, `marketCap`,
/// `returnOnEquity`, ...). Lookups never fail: absent or null keys render
/// as [`NA`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Info(BTreeMap<String, Value>);

impl Info {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. `null` values are not stored.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        if !value.is_null() {
            self.0.insert(key.into(), value);
        }
    }

    /// Merge fields from `other`, keeping existing keys.
    pub fn extend_missing(&mut self, other: Self) {
        for (k, v) in other.0 {
            self.0.entry(k).or_insert(v);
        }
    }

    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of stored fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no fields are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Text rendering of `key`, or "N/A".
    #[must_use]
    pub fn text_or_na(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => NA.to_string(),
            Some(Value::String(s)) if s.trim().is_empty() => NA.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                (None, Some(f)) => format_plain(f),
                (None, None) => n.to_string(),
            },
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Numeric value of `key`, if present and numeric.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Integral value of `key`, if present and whole.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e18)
                    .map(|v| v as i64)
            }),
            _ => None,
        }
    }

    /// Thousands-separated rendering of a numeric `key` (e.g. market cap), or "N/A".
    #[must_use]
    pub fn grouped_or_na(&self, key: &str) -> String {
        if let Some(i) = self.integer(key) {
            return group_thousands(i);
        }
        self.number(key).map_or_else(|| NA.to_string(), format_number)
    }

    /// Ratio `key` rendered as a percentage with two decimals, or "N/A".
    ///
    /// A zero ratio also renders as "N/A"; the provider reports zero for
    /// companies where the ratio is not meaningful.
    #[must_use]
    pub fn percent_or_na(&self, key: &str) -> String {
        match self.number(key) {
            Some(v) if v != 0.0 => crate::analytics::format_percent(Some(v)),
            _ => NA.to_string(),
        }
    }
}

impl FromIterator<(String, Value)> for Info {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut info = Self::new();
        for (k, v) in iter {
            info.insert(k, v);
        }
        info
    }
}

fn format_plain(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        NA.to_string()
    }
}
