//! DDL datatype to runtime dtype patterns.
//!
//! The DDL declares logical types (`long`, `double`, `char`, ...); the
//! produced parquet tables are observed under dataframe-style dtype
//! names (`int64`, `float64`, `object`, ...). Each DDL type maps to a
//! regex the observed name must match.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SchemaError;

/// Felis datatype name to expected runtime dtype pattern.
///
/// Timestamps are accepted at either nanosecond or microsecond
/// precision; everything else must match exactly.
const TYPE_PATTERNS: &[(&str, &str)] = &[
    ("boolean", "^bool$"),
    ("short", "^int16$"),
    ("int", "^int32$"),
    ("long", "^int64$"),
    ("float", "^float32$"),
    ("double", "^float64$"),
    ("char", "^object$"),
    ("timestamp", r"^datetime64\[[un]s\]$"),
];

static COMPILED: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    TYPE_PATTERNS
        .iter()
        .map(|(name, pattern)| (*name, Regex::new(pattern).expect("valid dtype pattern")))
        .collect()
});

/// The pattern an observed dtype must match for a DDL datatype.
pub fn expected_pattern(datatype: &str) -> Result<&'static Regex, SchemaError> {
    COMPILED
        .get(datatype)
        .ok_or_else(|| SchemaError::UnknownDatatype {
            datatype: datatype.to_string(),
        })
}

/// Whether an observed runtime dtype satisfies a DDL datatype.
pub fn matches(datatype: &str, observed: &str) -> Result<bool, SchemaError> {
    Ok(expected_pattern(datatype)?.is_match(observed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches() {
        assert!(matches("boolean", "bool").unwrap());
        assert!(matches("short", "int16").unwrap());
        assert!(matches("int", "int32").unwrap());
        assert!(matches("long", "int64").unwrap());
        assert!(matches("float", "float32").unwrap());
        assert!(matches("double", "float64").unwrap());
        assert!(matches("char", "object").unwrap());
    }

    #[test]
    fn timestamp_accepts_nano_and_micro() {
        assert!(matches("timestamp", "datetime64[ns]").unwrap());
        assert!(matches("timestamp", "datetime64[us]").unwrap());
        assert!(!matches("timestamp", "datetime64[ms]").unwrap());
        assert!(!matches("timestamp", "datetime64[s]").unwrap());
    }

    #[test]
    fn widths_are_not_interchangeable() {
        assert!(!matches("long", "int32").unwrap());
        assert!(!matches("int", "int64").unwrap());
        assert!(!matches("float", "float64").unwrap());
        assert!(!matches("double", "float32").unwrap());
    }

    #[test]
    fn patterns_are_anchored() {
        assert!(!matches("long", "uint64").unwrap());
        assert!(!matches("long", "int640").unwrap());
        assert!(!matches("boolean", "boolean").unwrap());
    }

    #[test]
    fn unknown_datatype_is_an_error() {
        let err = matches("decimal", "float64").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownDatatype { .. }));
    }
}
