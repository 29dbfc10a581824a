//! Generic tables passed from providers to the renderer without reinterpretation.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DashError;

/// A single table value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Free text.
    Text(String),
    /// Floating-point value.
    Number(f64),
    /// Whole number (counts, share volumes, epoch-free integers).
    Integer(i64),
    /// Calendar date.
    Date(NaiveDate),
    /// Flag.
    Bool(bool),
    /// Absent value; displays as "N/A".
    Missing,
}

impl Cell {
    /// Numeric view of the cell, if it holds a number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// True for `Missing` and non-finite numbers.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Number(v) => !v.is_finite(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(v) => f.write_str(&format_number(*v)),
            Self::Integer(v) => f.write_str(&group_thousands(*v)),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Bool(b) => f.write_str(if *b { "True" } else { "False" }),
            Self::Missing => f.write_str("N/A"),
        }
    }
}

/// Insert `,` separators every three digits.
#[must_use]
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole numbers are grouped; fractions keep up to four decimals with trailing zeros trimmed.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return "N/A".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return group_thousands(v as i64);
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Column names plus rows of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Header labels.
    pub columns: Vec<String>,
    /// Rows; each row has one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// An empty frame with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of a named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of a named column, top to bottom.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|r| r.get(idx)).collect())
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns `Data` if the row width differs from the header width.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), DashError> {
        if row.len() != self.columns.len() {
            return Err(DashError::Data(format!(
                "row has {} cells but frame has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build a frame from keyed records, taking the union of keys in first-seen order.
    ///
    /// Records lacking a key get `Missing` in that column.
    pub fn from_records<I, R, K>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, Cell)>,
        K: Into<String>,
    {
        let mut frame = Self::default();
        let mut staged: Vec<Vec<(usize, Cell)>> = Vec::new();
        for record in records {
            let mut row = Vec::new();
            for (key, cell) in record {
                let key = key.into();
                let idx = if let Some(i) = frame.column_index(&key) {
                    i
                } else {
                    frame.columns.push(key);
                    frame.columns.len() - 1
                };
                row.push((idx, cell));
            }
            staged.push(row);
        }
        let width = frame.columns.len();
        for entries in staged {
            let mut row = vec![Cell::Missing; width];
            for (idx, cell) in entries {
                row[idx] = cell;
            }
            frame.rows.push(row);
        }
        frame
    }

    /// Swap rows and columns.
    ///
    /// The first column becomes the new header (after a leading `label`
    /// column), which turns a period-per-row statement into the
    /// line-item-per-row layout shown on the dashboard.
    #[must_use]
    pub fn transpose(&self, label: &str) -> Self {
        if self.columns.is_empty() {
            return Self::default();
        }
        let mut out = Self::new(std::iter::once(label.to_string()).chain(
            self.rows
                .iter()
                .map(|r| r.first().map_or_else(String::new, ToString::to_string)),
        ));
        for (ci, name) in self.columns.iter().enumerate().skip(1) {
            let mut row = Vec::with_capacity(self.rows.len() + 1);
            row.push(Cell::Text(name.clone()));
            for r in &self.rows {
                row.push(r.get(ci).cloned().unwrap_or(Cell::Missing));
            }
            out.rows.push(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_handles_signs_and_widths() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
        assert_eq!(group_thousands(-12_345), "-12,345");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn cell_display() {
        assert_eq!(Cell::Missing.to_string(), "N/A");
        assert_eq!(Cell::Number(f64::NAN).to_string(), "N/A");
        assert_eq!(Cell::Number(1.5).to_string(), "1.5");
        assert_eq!(Cell::Number(0.123_456).to_string(), "0.1235");
        assert_eq!(Cell::Number(2_000_000.0).to_string(), "2,000,000");
        assert_eq!(Cell::Integer(42).to_string(), "42");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).to_string(),
            "2024-03-09"
        );
        assert_eq!(Cell::from(None::<f64>), Cell::Missing);
    }

    #[test]
    fn push_row_checks_width() {
        let mut f = Frame::new(["a", "b"]);
        assert!(f.push_row(vec![Cell::Integer(1)]).is_err());
        f.push_row(vec![Cell::Integer(1), Cell::Missing]).unwrap();
        assert_eq!(f.len(), 1);
        assert_eq!(f.column("b").unwrap(), vec![&Cell::Missing]);
        assert!(f.column("c").is_none());
    }

    #[test]
    fn from_records_unions_keys() {
        let f = Frame::from_records(vec![
            vec![("holder", Cell::from("Vanguard")), ("shares", Cell::Integer(10))],
            vec![("holder", Cell::from("BlackRock")), ("pct", Cell::Number(0.07))],
        ]);
        assert_eq!(f.columns, vec!["holder", "shares", "pct"]);
        assert_eq!(f.rows[0][2], Cell::Missing);
        assert_eq!(f.rows[1][1], Cell::Missing);
    }

    #[test]
    fn transpose_moves_periods_to_header() {
        let f = Frame::from_records(vec![
            vec![("period", Cell::from("2023")), ("revenue", Cell::Number(10.0))],
            vec![("period", Cell::from("2024")), ("revenue", Cell::Number(12.0))],
        ]);
        let t = f.transpose("Breakdown");
        assert_eq!(t.columns, vec!["Breakdown", "2023", "2024"]);
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][0], Cell::from("revenue"));
        assert_eq!(t.rows[0][2], Cell::Number(12.0));
    }
}
