use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use stilllife_render::RecordingBackend;
use stilllife_scene::{PrepareReport, SceneDocument, SceneManager};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stilllife-cli", about = "Compose and dry-run the desk still-life scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SceneArgs {
    /// Scene document (JSON). Uses the built-in still life when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,
    /// Directory texture paths are resolved against
    #[arg(short, long, default_value = ".")]
    asset_root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Prepare and render one frame, then print the recorded command stream
    Script {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Load every texture and material and report failures
    Check {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Write the built-in still-life document as JSON
    Export {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stilllife-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", stilllife_common::crate_info());
            println!("render: {}", stilllife_render::crate_info());
            println!("assets: {}", stilllife_assets::crate_info());
            println!("scene: {}", stilllife_scene::crate_info());
        }
        Commands::Script { scene } => {
            let mut manager = SceneManager::new(load_document(scene.scene.as_deref())?, scene.asset_root);
            let mut backend = RecordingBackend::new();

            let report = manager.prepare(&mut backend)?;
            let stats = manager.render(&mut backend)?;
            print!("{}", backend.to_transcript());
            println!(
                "Textures: {} loaded, {} failed",
                report.loaded.len(),
                report.failed.len()
            );
            println!(
                "Draws: {} ({} texture fallbacks, {} material fallbacks)",
                stats.draws, stats.texture_fallbacks, stats.material_fallbacks
            );
            manager.destroy(&mut backend);
        }
        Commands::Check { scene } => {
            let doc = load_document(scene.scene.as_deref())?;
            for tag in doc.undeclared_textures() {
                println!("undeclared texture: {tag}");
            }
            for tag in doc.undeclared_materials() {
                println!("undeclared material: {tag}");
            }

            let mut manager = SceneManager::new(doc, scene.asset_root);
            let mut backend = RecordingBackend::new();
            let report = manager.prepare(&mut backend)?;
            print_report(&report);
            manager.destroy(&mut backend);

            if !report.is_complete() {
                anyhow::bail!(
                    "{} texture(s) failed, {} material(s) skipped",
                    report.failed.len(),
                    report.skipped_materials.len()
                );
            }
        }
        Commands::Export { out } => {
            SceneDocument::still_life()
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Scene written to {}", out.display());
        }
    }

    Ok(())
}

fn load_document(path: Option<&Path>) -> anyhow::Result<SceneDocument> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading scene document");
            SceneDocument::load(p).with_context(|| format!("failed to load {}", p.display()))
        }
        None => Ok(SceneDocument::still_life()),
    }
}

fn print_report(report: &PrepareReport) {
    for tag in &report.loaded {
        println!("  ok      {tag}");
    }
    for (tag, err) in &report.failed {
        println!("  FAILED  {tag}: {err}");
    }
    for tag in &report.skipped_materials {
        println!("  SKIPPED material {tag} (duplicate)");
    }
    println!(
        "Textures: {}/{} loaded, {} units bound, {} materials, {} meshes",
        report.loaded.len(),
        report.loaded.len() + report.failed.len(),
        report.units_bound,
        report.materials,
        report.meshes
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn script_args_parse() {
        let cli = Cli::parse_from(["stilllife-cli", "-v", "script", "--asset-root", "assets"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Script { scene } => {
                assert_eq!(scene.asset_root, PathBuf::from("assets"));
                assert!(scene.scene.is_none());
            }
            _ => panic!("expected script"),
        }
    }

    #[test]
    fn load_document_defaults_to_still_life() {
        let doc = load_document(None).unwrap();
        assert_eq!(doc, SceneDocument::still_life());
    }

    #[test]
    fn exported_document_loads_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scene.json");
        SceneDocument::still_life().save(&path).unwrap();
        let doc = load_document(Some(&path)).unwrap();
        assert_eq!(doc.objects.len(), 15);
    }
}
