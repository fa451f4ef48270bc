use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

/// Map point enrichment CLI tool
#[derive(Parser)]
#[command(name = "kartpunkt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL template for the elevation lookup ({lon}/{lat} placeholders)
    #[arg(long, env = "KARTPUNKT_ELEVATION_URL", global = true)]
    elevation_url: Option<String>,

    /// URL template for the building footprint lookup ({lon}/{lat} placeholders)
    #[arg(long, env = "KARTPUNKT_BUILDINGS_URL", global = true)]
    buildings_url: Option<String>,

    /// Lookup request timeout in seconds
    #[arg(
        long,
        env = "KARTPUNKT_TIMEOUT_SECS",
        default_value = "10",
        global = true
    )]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a single coordinate and print the result
    Query {
        /// Longitude in decimal degrees
        #[arg(long)]
        lon: f64,

        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Read `lon lat` lines from stdin and treat each one as a map click
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (elevation, buildings) =
        commands::build_lookups(cli.elevation_url, cli.buildings_url, cli.timeout_secs)?;

    match cli.command {
        Commands::Query { lon, lat, json } => {
            commands::query::run(elevation, buildings, lon, lat, json).await
        }
        Commands::Watch => commands::watch::run(elevation, buildings).await,
    }
}
