use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use cipherstudio_project::{FileStorage, ProjectStore};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name
    #[arg(short, long, default_value = "Untitled Project")]
    pub name: String,

    /// Force overwrite existing config and project
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing CipherStudio project...".bright_blue().bold()
    );

    let config = Config::default();
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let mut store = ProjectStore::new(FileStorage::new(config.project_path(cwd, None)));
    if !args.force && store.load_from_storage()? {
        println!("  {} Kept existing {}", "•".dimmed(), config.storage_path);
    } else {
        store.create_new_project(&args.name);
        store.save_to_storage()?;
        println!(
            "  {} Created {} ({})",
            "✓".green(),
            config.storage_path,
            store.project().name
        );
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit the files in {}", config.storage_path);
    println!("  2. Run: cipherstudio serve");
    println!("  3. Open http://127.0.0.1:3000 in a browser");

    Ok(())
}
