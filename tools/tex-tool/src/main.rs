//! textool - TEX texture converter
//!
//! Converts `.tex` containers to PNG (plus `.uv.csv` sidecars for atlases)
//! and images back to `.tex`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tex_tool::config::{self, Config};
use tex_tool::inputs::collect_inputs;
use tex_tool::{ConvertOptions, convert_batch, inspect};

#[derive(Parser)]
#[command(name = "textool")]
#[command(about = "Convert TEX textures to PNG and images to TEX")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files or directories to convert (.tex -> .png, anything else -> .tex)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Overwrite existing outputs instead of numbering new ones
    #[arg(long)]
    overwrite: bool,

    /// Ignore .uv.csv sidecars
    #[arg(long)]
    no_uv: bool,

    /// Config file (default: config.toml in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print TEX headers without converting
    Info {
        /// TEX files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };

    match cli.command {
        Some(Commands::Info { files }) => print_info(&files, &config),
        None => {
            let mut options = ConvertOptions::from(&config.convert);
            if let Some(dir) = cli.output_dir {
                options.output_dir = Some(dir);
            }
            options.overwrite |= cli.overwrite;
            options.uv_sidecars &= !cli.no_uv;

            let inputs = collect_inputs(&cli.paths);
            if inputs.is_empty() {
                anyhow::bail!("No input files found");
            }

            let report = convert_batch(&inputs, &options);
            tracing::info!(
                "Done: {} converted, {} skipped, {} failed",
                report.converted(),
                report.skipped(),
                report.failed()
            );

            if report.has_failures() {
                anyhow::bail!("{} file(s) failed to convert", report.failed());
            }
            Ok(())
        }
    }
}

fn print_info(files: &[PathBuf], config: &Config) -> Result<()> {
    let mut failed = 0;

    for file in files {
        match inspect(file, config.convert.max_input_bytes) {
            Ok(tex) => {
                println!("{}", file.display());
                println!("  version:       {}", tex.version);
                println!("  internal path: {:?}", tex.internal_path);
                println!("  size:          {}x{}", tex.width, tex.height);
                println!("  format:        {}", tex.format);
                println!("  payload:       {} bytes", tex.payload.len());
                if !tex.uv_rects.is_empty() {
                    println!("  uv rects:      {}", tex.uv_rects.len());
                    for (i, rect) in tex.uv_rects.iter().enumerate() {
                        println!("    [{}] {}", i, rect.to_line());
                    }
                }
            }
            Err(e) => {
                tracing::error!("{:?}: {}", file, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) could not be read", failed);
    }
    Ok(())
}
