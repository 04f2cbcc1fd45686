// ===== fcopt/src/main.rs =====
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use fcopt::config::ClientConfig;
use fcopt::session::Session;
use std::path::PathBuf;
use std::process;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Facility-location optimization client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    client: ClientConfig,

    /// JSON file with client settings; explicit flags win over it
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit one optimization request and print the result
    Optimize(cmd::optimize::OptimizeArgs),
    /// Check that the model service is reachable
    Health,
}

#[tokio::main]
async fn main() {
    // 1. Parse raw matches so file settings only yield to explicit flags
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    // 2. Resolve client settings: JSON file first, then CLI/env overrides
    let config = match &cli.config {
        Some(path) => {
            println!("📂 Loading client config: {}", path.display());
            let mut file_config = ClientConfig::load_from_file(path).unwrap_or_else(|e| {
                eprintln!("❌ {}", e);
                process::exit(1);
            });
            let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);
            file_config.merge_from_cli(&cli.client, sub_matches);
            file_config
        }
        None => cli.client.clone(),
    };

    // 3. One session per run
    let session = Session::new(config).unwrap_or_else(|e| {
        eprintln!("\n❌ FATAL ERROR INITIALIZING SESSION:");
        eprintln!("   {}", e);
        process::exit(1);
    });

    // 4. Execute
    let ok = match cli.command {
        Commands::Optimize(args) => cmd::optimize::run(args, session).await,
        Commands::Health => cmd::health::run(session).await,
    };

    if !ok {
        process::exit(1);
    }
}
