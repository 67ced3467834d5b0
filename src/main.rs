use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use orderdesk::db::{connection, seed};
use orderdesk::rest;

#[derive(Parser)]
#[command(
    name = "orderdesk",
    version,
    about = "Business reporting backend: customers, orders, products and their tasks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file path
    #[arg(long, env = "ORDERDESK_DB", default_value = "orderdesk.db", global = true)]
    db: PathBuf,

    /// Log filter (e.g. info, orderdesk=debug)
    #[arg(long, env = "ORDERDESK_LOG", default_value = "info", global = true)]
    log: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and tables
    Init,
    /// Load the demo dataset into an initialized database
    Seed,
    /// Run the HTTP server
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .compact()
        .init();

    match cli.command {
        Commands::Init => {
            connection::init_db(&cli.db)?;
            info!("initialized database at {}", cli.db.display());
        }
        Commands::Seed => {
            let mut conn = connection::open_db(&cli.db)?;
            seed::seed(&mut conn)?;
            info!("seeded demo data into {}", cli.db.display());
        }
        Commands::Serve { port } => {
            let conn = connection::open_db(&cli.db)?;
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(rest::serve(conn, port))?;
        }
    }
    Ok(())
}
