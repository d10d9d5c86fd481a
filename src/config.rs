//! Command line configuration.

use std::path::PathBuf;

use clap::{Args, Parser};
use enrollment_core::Database;

/// Where the database lives.
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    /// Path to the SQLite database file. Defaults to the platform data directory.
    #[arg(long, env = "ENROLLMENT_DATABASE")]
    pub database: Option<PathBuf>,
}

impl DatabaseArgs {
    /// Opens the configured database and brings its schema up to date.
    pub fn open(&self) -> enrollment_core::Result<Database> {
        let db = match &self.database {
            Some(path) => Database::open(path)?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind the HTTP API to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port for HTTP API
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Resolved HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub database: DatabaseArgs,
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        Self {
            listen_addr: format!("{}:{}", args.host, args.port),
            database: args.database.clone(),
        }
    }
}

#[derive(Parser)]
struct BareServe {
    #[command(flatten)]
    args: ServeArgs,
}

impl ServeArgs {
    /// Serve arguments for a bare invocation: clap defaults plus any
    /// `ENROLLMENT_*` environment overrides.
    pub fn from_env() -> Self {
        BareServe::parse_from(["enrollment"]).args
    }
}
