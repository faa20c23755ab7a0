mod cmd;

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "action-docs",
    about = "Regenerate README documentation for a repository of CI actions",
    version
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .context("failed to resolve the current directory")
        .and_then(|root| cmd::generate::run(&root));

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        eprintln!("\nDocumentation generation failed.");
        std::process::exit(1);
    }
}
