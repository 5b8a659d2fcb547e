use clap::Parser;
use pdf_summarizer::Settings;
use pdf_summarizer::cli::commands::{init, serve, summarize};
use pdf_summarizer::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Init writes the config file; it must not require one to exist
    if let Commands::Init { force } = cli.command {
        init::run_init(force);
        return;
    }

    let config = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        eprintln!("Using default configuration.");
        Settings::default()
    });

    pdf_summarizer::logging::init_with_config(&config.logging);

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Config => init::run_config(&config),
        Commands::Serve { bind } => serve::run(config, bind).await,
        Commands::Summarize { file, top_k } => {
            // The embedding model and PDF parser block; keep them off the async workers
            let handle = tokio::task::spawn_blocking(move || summarize::run(config, &file, top_k));
            if let Err(e) = handle.await {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
