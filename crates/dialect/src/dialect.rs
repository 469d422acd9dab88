//! The Timestream dialect descriptor: identity, capabilities and the
//! connect entry point.

use serde::{Deserialize, Serialize};
use tracing::info;

use timestream_core::{BridgeError, BridgeErrorKind, DialectConfig, Result};

use crate::bridge::JdbcBridge;
use crate::compiler::{StatementCompiler, TypeCompiler};
use crate::connect::{ConnectArgs, ConnectArgsBuilder};
use crate::connection_url::ConnectionUrl;
use crate::credentials::{RoleAssumer, StsRoleAssumer};
use crate::preparer::IdentifierPreparer;
use crate::reflect::MetadataReflector;

/// Bridge error text that means the connection is gone.
const DISCONNECT_MARKERS: &[&str] = &["connection is closed", "cursor is closed"];

/// Feature flags the host toolkit consults before generating SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectCapabilities {
    pub supports_alter: bool,
    pub supports_pk_autoincrement: bool,
    pub supports_default_values: bool,
    pub supports_empty_insert: bool,
    pub supports_multivalues_insert: bool,
    pub supports_native_decimal: bool,
    pub supports_native_boolean: bool,
    pub supports_unicode_statements: bool,
    pub supports_unicode_binds: bool,
    pub supports_statement_cache: bool,
    pub supports_sane_rowcount: bool,
    pub supports_sane_multi_rowcount: bool,
    pub returns_unicode_strings: bool,
    pub postfetch_lastrowid: bool,
}

impl Default for DialectCapabilities {
    fn default() -> Self {
        Self {
            supports_alter: false,
            supports_pk_autoincrement: false,
            supports_default_values: false,
            supports_empty_insert: false,
            supports_multivalues_insert: false,
            supports_native_decimal: true,
            supports_native_boolean: true,
            supports_unicode_statements: true,
            supports_unicode_binds: true,
            supports_statement_cache: true,
            supports_sane_rowcount: false,
            supports_sane_multi_rowcount: false,
            returns_unicode_strings: true,
            postfetch_lastrowid: false,
        }
    }
}

/// Dialect adapter for Amazon Timestream over the JDBC bridge.
pub struct TimestreamDialect {
    config: DialectConfig,
    role_assumer: Box<dyn RoleAssumer>,
}

impl TimestreamDialect {
    pub const NAME: &'static str = "awstimestream";
    pub const DRIVER: &'static str = "jdbc";
    pub const PARAMSTYLE: &'static str = "pyformat";

    /// Dialect using STS for role assumption.
    pub fn new(config: DialectConfig) -> Self {
        Self::with_role_assumer(config, Box::new(StsRoleAssumer))
    }

    pub fn with_role_assumer(config: DialectConfig, role_assumer: Box<dyn RoleAssumer>) -> Self {
        Self {
            config,
            role_assumer,
        }
    }

    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    pub fn capabilities(&self) -> DialectCapabilities {
        DialectCapabilities::default()
    }

    pub fn type_compiler(&self) -> TypeCompiler {
        TypeCompiler
    }

    pub fn statement_compiler(&self) -> StatementCompiler {
        StatementCompiler
    }

    /// Preparer for DML statements; never quotes.
    pub fn preparer(&self) -> IdentifierPreparer {
        IdentifierPreparer::dml()
    }

    pub fn ddl_preparer(&self) -> IdentifierPreparer {
        IdentifierPreparer::ddl()
    }

    pub async fn create_connect_args(&self, url: &ConnectionUrl) -> Result<ConnectArgs> {
        ConnectArgsBuilder::new(&self.config, self.role_assumer.as_ref())
            .build(url)
            .await
    }

    /// Open a connection and return a fresh reflection session for it.
    pub async fn connect<B: JdbcBridge>(
        &self,
        bridge: &B,
        url: &str,
    ) -> Result<MetadataReflector<B::Connection>> {
        let url = ConnectionUrl::parse(url)?;
        let args = self.create_connect_args(&url).await?;
        let connection = bridge.connect(args).await?;
        info!(url = %url.redacted(), "Connected");
        Ok(MetadataReflector::new(
            connection,
            self.config.reflection_cache_size,
        ))
    }

    /// Whether `err` means the bridge connection or cursor has been closed.
    pub fn is_disconnect(&self, err: &BridgeError) -> bool {
        err.kind == BridgeErrorKind::Programming
            && DISCONNECT_MARKERS.iter().any(|m| err.message.contains(m))
    }

    /// The store has no transactions; rollback does nothing.
    pub fn do_rollback<C>(&self, _connection: &C) {}
}
