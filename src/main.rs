//! Schema-driven configuration editor CLI.

use std::path::PathBuf;

use clap::Parser;

/// Edit a configuration file through a TUI settings panel.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file to edit (.json or .toml).
    config: PathBuf,

    /// JSON Schema describing the fields; defaults to
    /// `<config stem>-schema.json` next to the config file.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Panel title; defaults to the schema's title.
    #[arg(long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let saved = cfgpanel::run::edit_with_schema(
        &args.config,
        args.schema,
        args.title,
        cfgpanel::Events::new(),
    )
    .await?;

    if saved {
        println!("Configuration saved to {}", args.config.display());
    } else {
        println!("No changes saved");
    }
    Ok(())
}
