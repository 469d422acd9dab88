//! Rendering of abstract types and function calls into store SQL.

use timestream_core::{DialectError, Result, SqlType};

// ---------------------------------------------------------------------------
// Type compiler
// ---------------------------------------------------------------------------

/// Renders abstract column types as the store's type keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCompiler;

impl TypeCompiler {
    /// Render `ty` as a type keyword.
    ///
    /// Character/binary large objects, fixed-width and national character
    /// types and binary types have no counterpart in the store and yield
    /// [`DialectError::UnsupportedType`].
    pub fn process(&self, ty: &SqlType) -> Result<String> {
        let keyword = match ty {
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Real | SqlType::Float | SqlType::Double => "DOUBLE",
            SqlType::Varchar { length: Some(n) } => return Ok(format!("VARCHAR({n})")),
            SqlType::Varchar { length: None } => "VARCHAR",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp | SqlType::DateTime => "TIMESTAMP",
            SqlType::Interval | SqlType::TimeSeries => "STRING",
            SqlType::Array => "ARRAY",
            SqlType::Null => "NULL",
            SqlType::Clob
            | SqlType::NClob
            | SqlType::Char
            | SqlType::NChar
            | SqlType::NVarchar
            | SqlType::Text
            | SqlType::Blob
            | SqlType::Binary
            | SqlType::VarBinary => {
                return Err(DialectError::UnsupportedType {
                    type_name: ty.to_string(),
                })
            }
        };
        Ok(keyword.to_string())
    }
}

// ---------------------------------------------------------------------------
// Statement compiler
// ---------------------------------------------------------------------------

/// Function-call rendering for DML statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementCompiler;

impl StatementCompiler {
    /// Render a function call. `char_length` is spelled `length` in the store.
    pub fn function_call(&self, name: &str, args: &[&str]) -> String {
        let name = if name.eq_ignore_ascii_case("char_length") {
            "length"
        } else {
            name
        };
        format!("{}({})", name, args.join(", "))
    }
}
