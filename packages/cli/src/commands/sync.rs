use crate::config::Config;
use anyhow::Result;
use cipherstudio_client::{load_project, save_project, HttpProjectService};
use cipherstudio_project::{FileStorage, ProjectStore};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Project JSON file (defaults to the configured storage path)
    pub project: Option<String>,

    /// Backend base URL (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct PullArgs {
    /// Id of the project on the backend
    pub id: String,

    /// Where to write the project (defaults to the configured storage path)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Backend base URL (overrides config)
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Save the local project to the backend, creating it there if needed
pub async fn push(args: PushArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = HttpProjectService::new(args.api_url.unwrap_or(config.api_url.clone()));
    let path = config.project_path(cwd, args.project.as_deref());

    let mut store = ProjectStore::new(FileStorage::new(&path));
    if !store.load_from_storage()? {
        anyhow::bail!("No project at {}", path.display());
    }

    println!(
        "{} {} → {}",
        "⬆️".bright_blue(),
        store.project().name.bold(),
        service.base_url()
    );

    let outcome = save_project(&service, &mut store).await?;
    println!("  {} {}", "✓".green(), outcome.message());
    println!("  id: {}", store.project().id);

    Ok(())
}

/// Replace the local project with the backend's copy
pub async fn pull(args: PullArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = HttpProjectService::new(args.api_url.unwrap_or(config.api_url.clone()));
    let path = config.project_path(cwd, args.out.as_deref());

    let mut store = ProjectStore::new(FileStorage::new(&path));
    load_project(&service, &mut store, &args.id).await?;
    store.save_to_storage()?;

    println!(
        "{} Project loaded successfully! {} → {}",
        "✅".green(),
        store.project().name.bold(),
        path.display()
    );

    Ok(())
}
