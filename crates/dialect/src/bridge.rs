//! Seams to the JDBC bridge that performs the actual I/O.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use timestream_core::BridgeError;

use crate::connect::ConnectArgs;

/// Opens connections through the bridge driver.
#[async_trait]
pub trait JdbcBridge: Send + Sync {
    type Connection: BridgeConnection;

    /// Connect using arguments produced by
    /// [`ConnectArgsBuilder`](crate::connect::ConnectArgsBuilder).
    async fn connect(&self, args: ConnectArgs) -> Result<Self::Connection, BridgeError>;
}

/// One logical bridge connection.
///
/// Calls are not expected to be issued concurrently on the same connection.
#[async_trait]
pub trait BridgeConnection: Send + Sync {
    /// Execute `sql` and wait for the complete result set.
    async fn execute(&self, sql: &str) -> Result<ResultSet, BridgeError>;

    /// Database the connection defaults to, if any.
    fn schema_name(&self) -> Option<String>;
}

/// A fully fetched result set.
///
/// Rows are stored as `Vec<Option<String>>` where `None` represents SQL NULL.
/// Column ordering in each row matches the `columns` vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Column labels in result-set order.
    pub columns: Vec<String>,
    /// Row data. Each inner vector has the same length as `columns`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zero-based index of the first column whose label matches one of
    /// `names` (case-insensitive), tried in order.
    pub fn column_index(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| {
            self.columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
        })
    }

    /// Cell at `row`, column `col`. `None` for out-of-range or SQL NULL.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "(empty result set)");
        }
        writeln!(f, "{}", self.columns.join(" | "))?;
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("NULL")).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        write!(f, "({} rows)", self.rows.len())
    }
}
