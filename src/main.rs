use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enrollment::config::{DatabaseArgs, ServeArgs, ServerConfig};
use enrollment::{api, mcp};

#[derive(Parser)]
#[command(name = "enrollment")]
#[command(about = "Student and course enrollment service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP RPC server
    Serve(ServeArgs),
    /// Start MCP server via stdio
    Mcp(DatabaseArgs),
    /// Create the database schema and exit
    Migrate(DatabaseArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the MCP protocol.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "enrollment=debug,enrollment_core=debug,tower_http=debug".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => serve(ServerConfig::from(&args)).await?,
        Some(Commands::Mcp(args)) => {
            let db = args.open()?;
            mcp::run_stdio_server(db).await?;
        }
        Some(Commands::Migrate(args)) => {
            args.open()?;
            println!("Database schema is up to date");
        }
        None => serve(ServerConfig::from(&ServeArgs::from_env())).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(listen = %config.listen_addr, "Starting enrollment server");

    let db = config.database.open()?;
    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Enrollment server listening on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
