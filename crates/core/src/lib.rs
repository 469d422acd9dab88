pub mod config;
pub mod error;
pub mod types;

pub use config::{load_dotenv, DialectConfig};
pub use error::*;
pub use types::{base_type_name, lookup_store_type, SqlType, TYPE_MAPPINGS};
