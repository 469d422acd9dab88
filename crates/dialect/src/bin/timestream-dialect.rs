//! timestream-dialect — inspect what the Timestream dialect would do.
//!
//! Subcommands:
//! - `connect-args <URL>` — build the bridge connect arguments (secrets masked)
//! - `compile-type <TYPE>` — render an abstract type as a store keyword
//! - `column-type <STORE_TYPE>` — abstract type a reflected column would get

use clap::{Parser, Subcommand};
use tracing::info;

use timestream_core::{load_dotenv, lookup_store_type, DialectConfig, SqlType};
use timestream_dialect::{ConnectionUrl, TimestreamDialect};

// ── CLI ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "timestream-dialect", version, about)]
struct Cli {
    /// Environment profile prefix (overrides TIMESTREAM_PROFILE).
    #[arg(long, env = "TIMESTREAM_PROFILE", default_value = "")]
    profile: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the connect arguments for a connection URL as JSON.
    ConnectArgs {
        /// e.g. awstimestream+jdbc://timestream.us-east-1.amazonaws.com?driver_path=/opt/driver.jar
        url: String,
    },
    /// Render an abstract type (INTEGER, VARCHAR, CLOB, ...) as a store keyword.
    CompileType {
        type_name: String,
        /// Length for VARCHAR.
        #[arg(long)]
        length: Option<u32>,
    },
    /// Map a store type name (e.g. `varchar(256)`) to its abstract type.
    ColumnType { store_type: String },
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = DialectConfig::from_env_profiled(&cli.profile.to_uppercase());
    info!(profile = %config.profile_label(), "loaded dialect config");

    let dialect = TimestreamDialect::new(config);

    match cli.command {
        Command::ConnectArgs { url } => {
            let url = ConnectionUrl::parse(&url)?;
            let args = dialect.create_connect_args(&url).await?;
            println!("{}", serde_json::to_string_pretty(&args.redacted())?);
        }
        Command::CompileType { type_name, length } => {
            let ty = match SqlType::from_name(&type_name) {
                Some(SqlType::Varchar { .. }) => SqlType::Varchar { length },
                Some(ty) => ty,
                None => anyhow::bail!("unknown type name `{}`", type_name),
            };
            println!("{}", dialect.type_compiler().process(&ty)?);
        }
        Command::ColumnType { store_type } => {
            let ty = lookup_store_type(&store_type);
            println!("{}", ty);
        }
    }

    Ok(())
}
