use super::read_project;
use crate::config::Config;
use anyhow::Result;
use cipherstudio_compiler_preview::{build_document, BuildOptions, SourceOrigin};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Project JSON file (defaults to the configured storage path)
    pub project: Option<String>,

    /// Output file
    #[arg(short, long, default_value = "dist/preview.html")]
    pub out: String,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn build(args: BuildArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = config.project_path(cwd, args.project.as_deref());
    let project = read_project(&project_path)?;

    let options = BuildOptions {
        runtime: config.runtime.clone(),
        ..BuildOptions::default()
    };
    let document = build_document(&project, 1, &options);

    if args.stdout {
        println!("{}", document.html);
        return Ok(());
    }

    println!("{}", "🔨 Building preview document...".bright_blue().bold());

    let output_file = PathBuf::from(cwd).join(&args.out);
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, &document.html)?;

    println!("  {} entry     {}", "✓".green(), describe(&document.entry));
    println!("  {} styles    {}", "✓".green(), describe(&document.stylesheet));
    if document.transform.placeholder {
        println!("  {} entry is empty, rendering a placeholder", "⚠️".yellow());
    }
    println!();
    println!(
        "{} Wrote {} ({} bytes)",
        "✅".green(),
        args.out,
        document.html.len()
    );

    Ok(())
}

pub(crate) fn describe(origin: &SourceOrigin) -> String {
    match origin {
        SourceOrigin::File { name, id } => format!("{} ({})", name, id.dimmed()),
        SourceOrigin::BuiltIn => "built-in default".dimmed().to_string(),
    }
}
