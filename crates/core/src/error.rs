use std::fmt;

use thiserror::Error;

/// Category of a failure reported by the JDBC bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeErrorKind {
    /// Misuse of the connection or cursor (closed handles, bad SQL).
    Programming,
    /// Failure while talking to the store.
    Operational,
    /// Failure inside the bridge layer itself (JVM, classloading).
    Interface,
}

impl fmt::Display for BridgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Programming => "programming",
            Self::Operational => "operational",
            Self::Interface => "interface",
        };
        f.write_str(label)
    }
}

/// An error surfaced by the underlying bridge driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct BridgeError {
    pub kind: BridgeErrorKind,
    pub message: String,
}

impl BridgeError {
    pub fn new(kind: BridgeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn programming(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::Programming, message)
    }

    pub fn operational(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::Operational, message)
    }
}

#[derive(Error, Debug)]
pub enum DialectError {
    /// The abstract type has no representation in the store.
    #[error("Data type `{type_name}` is not supported")]
    UnsupportedType { type_name: String },

    #[error(
        "JDBC driver JAR path is not found in CLASSPATH environment variable. Please set \
         the driver path in the aforementioned environment variable or in the driver_path \
         parameter of the connection URL"
    )]
    MissingDriverJar,

    /// Role assumption failed; the source error is surfaced as-is.
    #[error(transparent)]
    CredentialExchange(Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("No schema given and the connection has no default schema")]
    NoSchema,

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

pub type Result<T, E = DialectError> = std::result::Result<T, E>;
