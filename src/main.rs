use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use media_resolver::logging::init_logging;
use media_resolver::{ImageResolver, ResolverConfig};

#[derive(Parser)]
#[command(name = "media-resolver")]
#[command(about = "Resolve content-API image references into responsive image URLs")]
#[command(version)]
struct Cli {
  /// Content API URL; a trailing `/api` is stripped to find the asset host
  #[arg(long, env = "API_URL", global = true)]
  api_url: Option<String>,

  /// Configuration file (defaults to media_resolver.config.json in the working directory)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Log resolution decisions to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the repaired absolute URL for each reference
  Resolve {
    /// Image references as returned by the content API
    #[arg(required = true)]
    references: Vec<String>,
  },
  /// Print the candidate URL set derived from a reference
  Variants {
    /// Image reference
    reference: String,
  },
  /// Print the image chosen for a display width
  Select {
    /// Image reference
    reference: String,
    /// Display width in CSS pixels; omit for full width
    #[arg(long)]
    width: Option<u32>,
  },
  /// Resolve a JSON array of references into a manifest
  Manifest {
    /// JSON file containing an array of reference strings
    file: PathBuf,
  },
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();
  init_logging(cli.verbose)?;

  let config = match &cli.config {
    Some(path) => ResolverConfig::load_from_path(path)?,
    None => ResolverConfig::discover(&std::env::current_dir()?),
  }
  .with_api_url(cli.api_url);
  let resolver = ImageResolver::from_config(&config);

  match cli.command {
    Command::Resolve { references } => {
      for reference in references {
        println!("{}", resolver.fix_image_path(&reference));
      }
    }
    Command::Variants { reference } => {
      let set = resolver.optimized_urls(&reference);
      println!("{}", serde_json::to_string_pretty(&set)?);
    }
    Command::Select { reference, width } => match resolver.responsive(&reference, width) {
      Some(image) => println!("{}", serde_json::to_string_pretty(&image)?),
      None => return Ok(ExitCode::FAILURE),
    },
    Command::Manifest { file } => {
      let contents = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
      let references: Vec<String> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", file.display()))?;
      let manifest = resolver.resolve_all(&references);
      println!("{}", serde_json::to_string_pretty(&manifest)?);
    }
  }

  Ok(ExitCode::SUCCESS)
}
