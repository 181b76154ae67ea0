//! Cell values and value kinds

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Declared value kind of a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CellType {
    #[default]
    Null,
    Bool,
    Int,
    Float,
    Str,
    Date,
    DateTime,
    Mixed,
}

impl CellType {
    /// Widen the type to accommodate another type
    pub fn widen(self, other: CellType) -> CellType {
        if self == other {
            return self;
        }

        match (self, other) {
            (CellType::Null, t) | (t, CellType::Null) => t,
            (CellType::Int, CellType::Float) | (CellType::Float, CellType::Int) => CellType::Float,
            (CellType::Date, CellType::DateTime) | (CellType::DateTime, CellType::Date) => {
                CellType::DateTime
            }
            _ => CellType::Mixed,
        }
    }

    /// Whether arithmetic and numeric aggregates apply to this kind
    pub fn is_numeric(self) -> bool {
        matches!(self, CellType::Int | CellType::Float | CellType::Null)
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellType::Null => write!(f, "null"),
            CellType::Bool => write!(f, "bool"),
            CellType::Int => write!(f, "int"),
            CellType::Float => write!(f, "float"),
            CellType::Str => write!(f, "string"),
            CellType::Date => write!(f, "date"),
            CellType::DateTime => write!(f, "datetime"),
            CellType::Mixed => write!(f, "mixed"),
        }
    }
}

/// A single cell: a typed datum or the missing marker
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Missing-marker semantics also cover NaN
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Str(a), CellValue::Str(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Int and Float hash through f64 bits so that hashing agrees with
        // the cross-type numeric equality above.
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Int(i) => {
                2u8.hash(state);
                (*i as f64).to_bits().hash(state);
            }
            CellValue::Float(f) => {
                2u8.hash(state);
                f.to_bits().hash(state);
            }
            CellValue::Str(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            CellValue::Date(d) => {
                4u8.hash(state);
                d.hash(state);
            }
            CellValue::DateTime(dt) => {
                5u8.hash(state);
                dt.hash(state);
            }
        }
    }
}

impl CellValue {
    /// Check if the value is the missing marker
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The kind of this single value
    pub fn kind(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::Str(_) => CellType::Str,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Element-wise ordering used for mask construction.
    ///
    /// Returns `None` when either side is the missing marker or the kinds
    /// are not comparable; a mask entry built from `None` is `false`.
    pub fn partial_cmp_value(&self, other: &CellValue) -> Option<Ordering> {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => Some(a.cmp(b)),
            (CellValue::Float(a), CellValue::Float(b)) => a.partial_cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64).partial_cmp(b),
            (CellValue::Float(a), CellValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (CellValue::Str(a), CellValue::Str(b)) => Some(a.cmp(b)),
            (CellValue::Bool(a), CellValue::Bool(b)) => Some(a.cmp(b)),
            (CellValue::Date(a), CellValue::Date(b)) => Some(a.cmp(b)),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Parse a string into the most specific value kind.
    ///
    /// Empty strings and the usual null spellings become the missing marker.
    pub fn infer(s: &str) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
            return CellValue::Null;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        if let Some(temporal) = CellValue::parse_temporal(trimmed) {
            return temporal;
        }

        CellValue::Str(trimmed.to_string())
    }

    /// Parse a string as a date or datetime, trying the recognized formats.
    ///
    /// Returns `None` on failure; callers coerce that to the missing marker
    /// rather than raising.
    pub fn parse_temporal(s: &str) -> Option<CellValue> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(CellValue::Date(date));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Some(CellValue::DateTime(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(CellValue::DateTime(dt));
        }
        None
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Str(s) => write!(f, "{}", s),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Str(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Str(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("null"), CellValue::Null);
        assert_eq!(CellValue::infer("NA"), CellValue::Null);
        assert_eq!(CellValue::infer("true"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("42"), CellValue::Int(42));
        assert_eq!(CellValue::infer("3.14"), CellValue::Float(3.14));
        assert_eq!(CellValue::infer("hello"), CellValue::from("hello"));
        assert_eq!(
            CellValue::infer("2023-05-01"),
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap())
        );
    }

    #[test]
    fn test_cross_type_numeric_eq_and_hash() {
        use std::collections::hash_map::DefaultHasher;

        assert_eq!(CellValue::Int(3), CellValue::Float(3.0));

        let hash = |v: &CellValue| {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&CellValue::Int(3)), hash(&CellValue::Float(3.0)));
    }

    #[test]
    fn test_null_comparisons_are_none() {
        assert_eq!(CellValue::Null.partial_cmp_value(&CellValue::Int(1)), None);
        assert_eq!(CellValue::Int(1).partial_cmp_value(&CellValue::Null), None);
    }

    #[test]
    fn test_widen() {
        assert_eq!(CellType::Int.widen(CellType::Float), CellType::Float);
        assert_eq!(CellType::Null.widen(CellType::Str), CellType::Str);
        assert_eq!(CellType::Date.widen(CellType::DateTime), CellType::DateTime);
        assert_eq!(CellType::Int.widen(CellType::Str), CellType::Mixed);
    }
}
