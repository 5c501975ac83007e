use crate::commands::{Cli, Commands};
use crate::editor::Editor;
use crate::manager::MetadataManager;
use crate::tag::TagStore;
use anyhow::Result;
use clap::Parser;
use std::io::{Read, Write};

mod commands;
mod editor;
mod error;
mod formats;
mod manager;
mod metadata;
mod tag;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let manager = MetadataManager::new(cli.format, cli.toc_title);

    match cli.command {
        Commands::Get(cmd) => {
            let rendered = manager.get(&TagStore::new(&cmd.audio))?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
        Commands::Set(cmd) => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            manager.set(&TagStore::new(&cmd.audio), &input)?;
        }
        Commands::Edit(cmd) => {
            manager.edit(&TagStore::new(&cmd.audio), &Editor::new(cmd.editor))?;
        }
    }

    Ok(())
}
