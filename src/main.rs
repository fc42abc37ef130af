mod client;
mod events;
mod logging;

use clap::{Parser, Subcommand};
use client::Client;
use spire_core::config;

#[derive(Parser)]
#[command(
    name = "spire",
    version,
    about = "Spire: piece-based bot framework"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load all pieces, emit `ready`, and run until Ctrl-C.
    Start,
    /// Show loaded languages, their core-merge outcome, and events.
    Status,
    /// Resolve a language term.
    Lookup {
        /// Language to resolve in (default: the configured default language).
        #[arg(short, long)]
        language: Option<String>,
        /// Term to look up (e.g. COMMAND_PING).
        term: String,
        /// Arguments passed to the term's formatter.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = logging::init(&cfg.spire);

    let mut client = Client::new(cfg);
    client.load().await;

    match cli.command {
        Commands::Start => {
            client.ready();
            tokio::signal::ctrl_c().await?;
            client.shutdown();
        }
        Commands::Status => {
            let cfg = client.config();
            println!("{} status\n", cfg.spire.name);
            println!("Config: {}", cli.config);
            println!("Core dir: {}", client.core_dir().display());
            println!("Data dir: {}", client.data_dir().display());
            println!("Listener cleanup: {:?}", client.events.cleanup());
            println!();

            println!("Languages (default: {}):", client.languages.default_name());
            for name in client.languages.names() {
                let Some(lang) = client.languages.get_piece(&name) else {
                    continue;
                };
                let outcome = client
                    .languages
                    .outcome(&name)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                println!(
                    "  {name}: {} | {} terms | {outcome}",
                    if lang.is_enabled() { "enabled" } else { "disabled" },
                    lang.terms().len(),
                );
            }
            println!();

            println!("Events:");
            for name in client.events.names() {
                println!(
                    "  {name} ({} listener(s))",
                    client.emitter().listener_count(&name)
                );
            }
        }
        Commands::Lookup {
            language,
            term,
            args,
        } => {
            let language =
                language.unwrap_or_else(|| client.languages.default_name().to_string());
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            println!("{}", client.languages.get(&language, &term, &args));
        }
    }

    Ok(())
}
