pub mod bridge;
pub mod cache;
pub mod compiler;
pub mod connect;
pub mod connection_url;
pub mod credentials;
pub mod dialect;
pub mod driver;
pub mod preparer;
pub mod reflect;

pub use bridge::{BridgeConnection, JdbcBridge, ResultSet};
pub use compiler::{StatementCompiler, TypeCompiler};
pub use connect::{ConnectArgs, ConnectArgsBuilder, ConnectKwargs};
pub use connection_url::ConnectionUrl;
pub use credentials::{AssumedCredentials, RoleAssumer, StsRoleAssumer};
pub use dialect::{DialectCapabilities, TimestreamDialect};
pub use preparer::{IdentifierPreparer, QuoteStrategy};
pub use reflect::{ColumnDescriptor, ForeignKey, IndexInfo, MetadataReflector};
pub use timestream_core::{BridgeError, BridgeErrorKind, DialectConfig, DialectError, SqlType};
