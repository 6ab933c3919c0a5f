use super::read_project;
use crate::commands::build::describe;
use crate::config::Config;
use anyhow::Result;
use cipherstudio_compiler_preview::{transform_source, PreviewBuildInput};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Project JSON file (defaults to the configured storage path)
    pub project: Option<String>,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = config.project_path(cwd, args.project.as_deref());
    let project = read_project(&project_path)?;

    println!(
        "{} {} ({})",
        "🔍".bright_blue(),
        project.name.bold(),
        project.id.dimmed()
    );
    println!();

    for file in &project.files {
        let marker = if project.active_file_id.as_deref() == Some(file.id.as_str()) {
            "▸".green()
        } else {
            " ".normal()
        };
        println!(
            "  {} {:<24} {:<10} {:<28} {} bytes",
            marker,
            file.name,
            file.kind.as_str(),
            file.path.dimmed(),
            file.content.len()
        );
    }
    if project.files.is_empty() {
        println!("  {}", "(no files)".dimmed());
    }

    let input = PreviewBuildInput::from_project(&project);
    let transform = transform_source(input.entry_source());

    println!();
    println!("  entry      {}", describe(&input.entry));
    println!("  styles     {}", describe(&input.stylesheet));
    println!(
        "  component  {}",
        transform.entry_name.as_deref().unwrap_or("(resolved at runtime)")
    );
    if transform.placeholder {
        println!("  {} entry is empty, the preview shows a placeholder", "⚠️".yellow());
    }

    println!();
    println!("{} Project is valid", "✅".green());

    Ok(())
}
