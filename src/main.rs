//! braille - translate text to Braille and emboss it as a 3D mesh
//!
//! # Commands
//! - `braille translate <text>` - Print the Braille translation
//! - `braille tokens <text>` - Print the classified runs the translator sees
//! - `braille mesh <text>` - Write an OBJ mesh of the embossed translation

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use braille_fsm::braille::{Pipeline, TranslatorConfig};
use braille_fsm::core::State;
use braille_fsm::mesh::{write_obj, MeshGenerator, MeshParams};

/// Best-effort text to Braille translator and mesh generator
#[derive(Parser)]
#[command(name = "braille")]
#[command(author, version, about)]
struct Cli {
    /// Translator config JSON (spaces per tab, fragments, abbreviations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text and print the Braille cells
    Translate {
        /// Text to translate; each line is translated separately
        text: String,
    },

    /// Print the classified runs of the text
    Tokens {
        text: String,

        /// Print as JSON instead of one run per line
        #[arg(long)]
        json: bool,
    },

    /// Translate text and write an OBJ mesh of the embossed cells
    Mesh {
        text: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mesh parameters JSON (default: Specification 800 dimensions)
        #[arg(long)]
        params: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let pipeline = load_pipeline(cli.config.as_deref())?;

    match cli.command {
        Commands::Translate { text } => {
            println!("{}", translate_lines(&pipeline, &text)?);
            Ok(())
        }
        Commands::Tokens { text, json } => run_tokens_command(&pipeline, &text, json),
        Commands::Mesh {
            text,
            output,
            params,
        } => run_mesh_command(&pipeline, &text, output.as_deref(), params.as_deref()),
    }
}

/// Logs go to stderr so OBJ output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_pipeline(config: Option<&Path>) -> Result<Pipeline> {
    let config = match config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            TranslatorConfig::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => TranslatorConfig::default(),
    };

    Pipeline::with_config(config).context("Failed to build translation pipeline")
}

/// Translate line by line; line breaks are layout, not input.
fn translate_lines(pipeline: &Pipeline, text: &str) -> Result<String> {
    let lines = text
        .lines()
        .map(|line| {
            pipeline
                .translate(line)
                .with_context(|| format!("Failed to translate {line:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn run_tokens_command(pipeline: &Pipeline, text: &str, json: bool) -> Result<()> {
    let runs = pipeline.tokenize(text).context("Failed to tokenize input")?;

    if json {
        let out = serde_json::to_string_pretty(&runs).context("Failed to encode runs")?;
        println!("{out}");
        return Ok(());
    }

    for run in &runs {
        let tag = run.tag().map(|tag| tag.name()).unwrap_or("-");
        println!("{tag:<12} {:?}", run.text());
    }
    Ok(())
}

fn run_mesh_command(
    pipeline: &Pipeline,
    text: &str,
    output: Option<&Path>,
    params: Option<&Path>,
) -> Result<()> {
    let params = match params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read mesh params {}", path.display()))?;
            MeshParams::from_json(&json)
                .with_context(|| format!("Invalid mesh params {}", path.display()))?
        }
        None => MeshParams::default(),
    };

    let braille = translate_lines(pipeline, text)?;
    let generator = MeshGenerator::new(params).context("Failed to set up mesh generator")?;
    let mesh = generator
        .braille_mesh(&braille)
        .context("Failed to generate mesh")?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_obj(&mut out, &mesh).context("Failed to write OBJ")?;
            out.flush().context("Failed to write OBJ")?;
            eprintln!(
                "{} vertices, {} triangles written to {}",
                mesh.vertex_count(),
                mesh.triangle_count(),
                path.display()
            );
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            writeln!(out, "# {braille}").context("Failed to write OBJ")?;
            write_obj(&mut out, &mesh).context("Failed to write OBJ")?;
            out.flush().context("Failed to write OBJ")?;
        }
    }
    Ok(())
}
