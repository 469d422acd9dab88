//! Schema introspection over a bridge connection.
//!
//! Each operation runs one fixed statement and reshapes the rows. Results are
//! cached per session by call signature; a new connection gets a new
//! [`MetadataReflector`] and therefore a new cache.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use timestream_core::{lookup_store_type, DialectError, Result, SqlType};

use crate::bridge::{BridgeConnection, ResultSet};
use crate::cache::{CacheKey, CachedValue, ReflectionCache};
use crate::preparer::IdentifierPreparer;

pub const SHOW_DATABASES: &str = "SHOW DATABASES";

const SCHEMA_NAME_COLUMNS: &[&str] = &["schema_name", "database"];
const TABLE_NAME_COLUMNS: &[&str] = &["table_name", "table"];
const COLUMN_NAME_COLUMNS: &[&str] = &["column_name", "column"];
const DATA_TYPE_COLUMNS: &[&str] = &["data_type", "type"];

pub fn show_tables_sql(schema: &str) -> String {
    format!("SHOW TABLES FROM {}", IdentifierPreparer::dml().quote(schema))
}

pub fn describe_sql(schema: &str, table: &str) -> String {
    format!(
        "DESCRIBE {}",
        IdentifierPreparer::dml().format_table(Some(schema), table)
    )
}

// ── Reflected shapes ────────────────────────────────────────────

/// One reflected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: SqlType,
    pub nullable: bool,
    pub default: Option<String>,
    /// 1-based position within the table.
    pub ordinal_position: u32,
    pub comment: Option<String>,
}

/// Foreign key as the toolkit describes one. The store has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: Option<String>,
    pub constrained_columns: Vec<String>,
    pub referred_schema: Option<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
}

/// Index as the toolkit describes one. The store has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    pub column_names: Vec<String>,
    pub unique: bool,
}

/// Column positions within a `DESCRIBE` result.
struct DescribeLayout {
    name: usize,
    data_type: usize,
    nullable: Option<usize>,
    default: Option<usize>,
    ordinal: Option<usize>,
    comment: Option<usize>,
}

impl DescribeLayout {
    fn of(rs: &ResultSet) -> Self {
        Self {
            name: rs.column_index(COLUMN_NAME_COLUMNS).unwrap_or(0),
            data_type: rs.column_index(DATA_TYPE_COLUMNS).unwrap_or(1),
            nullable: rs.column_index(&["is_nullable"]),
            default: rs.column_index(&["column_default"]),
            ordinal: rs.column_index(&["ordinal_position"]),
            comment: rs.column_index(&["comment"]),
        }
    }

    fn descriptor(&self, rs: &ResultSet, row: usize) -> ColumnDescriptor {
        let cell = |col: Option<usize>| col.and_then(|c| rs.value(row, c));

        let data_type = rs.value(row, self.data_type).unwrap_or("unknown");
        ColumnDescriptor {
            name: rs.value(row, self.name).unwrap_or_default().to_string(),
            sql_type: lookup_store_type(data_type),
            nullable: cell(self.nullable).map_or(true, |v| v == "YES"),
            default: cell(self.default).map(str::to_string),
            ordinal_position: cell(self.ordinal)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(row as u32 + 1),
            comment: cell(self.comment).map(str::to_string),
        }
    }
}

fn single_column(rs: &ResultSet, preferred: &[&str]) -> Vec<String> {
    let col = rs.column_index(preferred).unwrap_or(0);
    (0..rs.row_count())
        .filter_map(|row| rs.value(row, col).map(str::to_string))
        .collect()
}

// ── Reflector ───────────────────────────────────────────────────

/// Introspection session bound to one bridge connection.
pub struct MetadataReflector<C> {
    connection: C,
    cache: ReflectionCache,
}

impl<C: BridgeConnection> MetadataReflector<C> {
    pub fn new(connection: C, cache_size: usize) -> Self {
        Self {
            connection,
            cache: ReflectionCache::new(cache_size),
        }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn cache(&self) -> &ReflectionCache {
        &self.cache
    }

    /// Hand back the connection, discarding cached metadata.
    pub fn into_connection(self) -> C {
        self.connection
    }

    fn effective_schema(&self, schema: Option<&str>) -> Result<String> {
        schema
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.connection.schema_name())
            .ok_or(DialectError::NoSchema)
    }

    async fn run(&self, sql: &str) -> Result<ResultSet> {
        debug!(sql = %sql, "Running reflection query");
        let rs = self.connection.execute(sql).await?;
        debug!(rows = rs.row_count(), "Reflection query returned");
        Ok(rs)
    }

    async fn cached_names(&self, key: CacheKey, sql: &str, preferred: &[&str]) -> Result<Vec<String>> {
        if let Some(CachedValue::Names(names)) = self.cache.get(&key) {
            return Ok(names);
        }
        let names = single_column(&self.run(sql).await?, preferred);
        self.cache.put(key, CachedValue::Names(names.clone()));
        Ok(names)
    }

    /// Names of all databases, in result order.
    pub async fn get_schema_names(&self) -> Result<Vec<String>> {
        self.cached_names(CacheKey::SchemaNames, SHOW_DATABASES, SCHEMA_NAME_COLUMNS)
            .await
    }

    /// Tables of `schema`, or of the connection's default database.
    pub async fn get_table_names(&self, schema: Option<&str>) -> Result<Vec<String>> {
        let schema = self.effective_schema(schema)?;
        let sql = show_tables_sql(&schema);
        self.cached_names(CacheKey::TableNames { schema }, &sql, TABLE_NAME_COLUMNS)
            .await
    }

    /// Membership test against [`get_table_names`](Self::get_table_names).
    pub async fn has_table(&self, table_name: &str, schema: Option<&str>) -> Result<bool> {
        let tables = self.get_table_names(schema).await?;
        Ok(tables.iter().any(|t| t == table_name))
    }

    /// Describe the columns of `table_name`.
    ///
    /// Store types are reduced to their base name (`varchar(256)` →
    /// `varchar`) and looked up in the type mapping table; unmapped types
    /// become [`SqlType::Null`].
    pub async fn get_columns(
        &self,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnDescriptor>> {
        let schema = self.effective_schema(schema)?;
        let key = CacheKey::Columns {
            schema: schema.clone(),
            table: table_name.to_string(),
        };
        if let Some(CachedValue::Columns(columns)) = self.cache.get(&key) {
            return Ok(columns);
        }

        let rs = self.run(&describe_sql(&schema, table_name)).await?;
        let layout = DescribeLayout::of(&rs);
        let columns: Vec<ColumnDescriptor> = (0..rs.row_count())
            .map(|row| layout.descriptor(&rs, row))
            .collect();

        info!(
            schema = %schema,
            table = %table_name,
            columns = columns.len(),
            "Reflected table columns"
        );

        self.cache.put(key, CachedValue::Columns(columns.clone()));
        Ok(columns)
    }

    // The store has no foreign keys, primary keys or indexes.

    pub async fn get_foreign_keys(
        &self,
        _table_name: &str,
        _schema: Option<&str>,
    ) -> Result<Vec<ForeignKey>> {
        Ok(Vec::new())
    }

    /// Constrained columns of the primary key.
    pub async fn get_pk_constraint(
        &self,
        _table_name: &str,
        _schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    pub async fn get_indexes(
        &self,
        _table_name: &str,
        _schema: Option<&str>,
    ) -> Result<Vec<IndexInfo>> {
        Ok(Vec::new())
    }
}
