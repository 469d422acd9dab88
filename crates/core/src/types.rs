//! Abstract SQL types and the store-type mapping table.
//!
//! [`SqlType`] is the toolkit-facing vocabulary. [`TYPE_MAPPINGS`] maps the
//! type names the store reports (in `DESCRIBE` output) onto it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract column type as understood by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlType {
    Integer,
    BigInt,
    Boolean,
    Real,
    Float,
    Double,
    /// Variable-length string; `None` length is the generic string type.
    Varchar { length: Option<u32> },
    Date,
    Time,
    Timestamp,
    DateTime,
    Interval,
    TimeSeries,
    Array,
    /// Type of unknown or untyped values.
    Null,
    Clob,
    NClob,
    Char,
    NChar,
    NVarchar,
    Text,
    Blob,
    Binary,
    VarBinary,
}

impl SqlType {
    /// Generic string type (VARCHAR without a length).
    pub const STRING: SqlType = SqlType::Varchar { length: None };

    /// Upper-case type name, without any length parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Boolean => "BOOLEAN",
            Self::Real => "REAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Varchar { .. } => "VARCHAR",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::DateTime => "DATETIME",
            Self::Interval => "INTERVAL",
            Self::TimeSeries => "TIMESERIES",
            Self::Array => "ARRAY",
            Self::Null => "NULL",
            Self::Clob => "CLOB",
            Self::NClob => "NCLOB",
            Self::Char => "CHAR",
            Self::NChar => "NCHAR",
            Self::NVarchar => "NVARCHAR",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
        }
    }

    /// Parse an upper- or lower-case type name such as `varchar` or `TIMESTAMP`.
    ///
    /// `UNKNOWN` and `NULLTYPE` both resolve to [`SqlType::Null`].
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name.trim().to_ascii_uppercase().as_str() {
            "INTEGER" | "INT" => Self::Integer,
            "BIGINT" => Self::BigInt,
            "BOOLEAN" => Self::Boolean,
            "REAL" => Self::Real,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "VARCHAR" | "STRING" => Self::STRING,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "DATETIME" => Self::DateTime,
            "INTERVAL" => Self::Interval,
            "TIMESERIES" => Self::TimeSeries,
            "ARRAY" => Self::Array,
            "NULL" | "NULLTYPE" | "UNKNOWN" => Self::Null,
            "CLOB" => Self::Clob,
            "NCLOB" => Self::NClob,
            "CHAR" => Self::Char,
            "NCHAR" => Self::NChar,
            "NVARCHAR" => Self::NVarchar,
            "TEXT" => Self::Text,
            "BLOB" => Self::Blob,
            "BINARY" => Self::Binary,
            "VARBINARY" => Self::VarBinary,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varchar { length: Some(n) } => write!(f, "VARCHAR({n})"),
            other => f.write_str(other.name()),
        }
    }
}

// ── Type mapping table ──────────────────────────────────────────

/// Store type name (lower-case, without size suffix) to abstract type.
pub static TYPE_MAPPINGS: &[(&str, SqlType)] = &[
    ("boolean", SqlType::Boolean),
    ("double", SqlType::Float),
    ("integer", SqlType::Integer),
    ("bigint", SqlType::BigInt),
    ("varchar", SqlType::STRING),
    ("array", SqlType::STRING),
    ("row", SqlType::STRING),
    ("date", SqlType::Date),
    ("time", SqlType::Timestamp),
    ("timestamp", SqlType::Timestamp),
    ("interval", SqlType::STRING),
    ("timeseries", SqlType::STRING),
    ("unknown", SqlType::Null),
];

/// Strip a parenthesised size/precision suffix: `varchar(256)` → `varchar`.
///
/// Only names made of ASCII letters optionally followed by a non-empty
/// `( ... )` group at the very end are reduced; anything else is returned
/// unchanged.
pub fn base_type_name(type_name: &str) -> &str {
    let letters = type_name
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if letters == 0 {
        return type_name;
    }

    let (head, rest) = type_name.split_at(letters);
    let has_suffix = rest.len() > 2 && rest.starts_with('(') && rest.ends_with(')');
    if rest.is_empty() || has_suffix {
        head
    } else {
        type_name
    }
}

/// Map a store-reported column type to its abstract type.
///
/// Unrecognised names map to [`SqlType::Null`].
pub fn lookup_store_type(type_name: &str) -> SqlType {
    let base = base_type_name(type_name.trim()).to_ascii_lowercase();
    TYPE_MAPPINGS
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, ty)| *ty)
        .unwrap_or(SqlType::Null)
}
