//! bone-remap - rest-pose and coordinate conversion tables for skeletal rigs
//!
//! Aligns every listed bone of a rig to a canonical world axis and prints,
//! per bone, the rest-pose correction and coordinate conversion quaternions.

use anyhow::{Context, Result};
use bone_remap::{
    DEFAULT_PRECISION, PipelineOptions, RemapError, RowStyle, Skeleton, remap, validate_tasks,
};
use bone_remap_cli::{RigSource, load_skeleton, load_tasks, order_listing};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bone-remap")]
#[command(about = "Bone-axis remapping tables for skeletal rigs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print one mapping row per bone
    Remap {
        #[command(flatten)]
        input: InputArgs,

        /// Row style (overrides the task file)
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Digits after the decimal point in text rows
        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave IK constraints enabled
        #[arg(long)]
        keep_ik: bool,

        /// Leave channel locks in place
        #[arg(long)]
        keep_locks: bool,
    },

    /// Print the hierarchy processing order without touching the rig
    Order {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate the rig and task table
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Problem list format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Rig file (TOML)
    #[arg(short, long, required_unless_present = "gltf", conflicts_with = "gltf")]
    rig: Option<PathBuf>,

    /// Read the skeleton from a glTF/GLB skin instead
    #[arg(long)]
    gltf: Option<PathBuf>,

    /// Skeleton (rig file) or skin (glTF) name (default: first)
    #[arg(short, long, visible_alias = "skin")]
    skeleton: Option<String>,

    /// Task table (default: built-in MMD table)
    #[arg(short, long)]
    tasks: Option<PathBuf>,
}

impl InputArgs {
    fn load_skeleton(&self) -> Result<Option<Skeleton>> {
        let source = match (&self.rig, &self.gltf) {
            (Some(rig), _) => RigSource::Toml(rig),
            (None, Some(gltf)) => RigSource::Gltf(gltf),
            (None, None) => anyhow::bail!("Either --rig or --gltf is required"),
        };
        let skeleton = load_skeleton(source, self.skeleton.as_deref())?;
        if skeleton.is_none() {
            match &self.skeleton {
                Some(name) => tracing::error!("Skeleton '{}' not found", name),
                None => tracing::error!("Input contains no skeleton"),
            }
        }
        Ok(skeleton)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Tuple,
    Csharp,
}

impl From<StyleArg> for RowStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Tuple => RowStyle::Tuple,
            StyleArg::Csharp => RowStyle::CSharp,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Logs on stderr, report on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Remap {
            input,
            style,
            format,
            precision,
            output,
            keep_ik,
            keep_locks,
        } => {
            let table = load_tasks(input.tasks.as_deref())?;
            let mut skeleton = input.load_skeleton()?;

            let options = PipelineOptions {
                disable_ik: !keep_ik,
                unlock_channels: !keep_locks,
                eye_bones: table.eye_bones,
                style: style.map(RowStyle::from).or(table.style).unwrap_or_default(),
                precision,
            };
            let result = remap(skeleton.as_mut(), &table.tasks, &options)?;

            let rendered = match format {
                Format::Text => result.report.to_string(),
                Format::Json => {
                    let mut json = result.report.to_json()?;
                    json.push('\n');
                    json
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write report: {:?}", path))?;
                    tracing::info!("Wrote {} rows to {:?}", result.report.entries.len(), path);
                }
                None => print!("{}", rendered),
            }
        }

        Commands::Order { input } => {
            let table = load_tasks(input.tasks.as_deref())?;
            let skeleton = input
                .load_skeleton()?
                .ok_or(RemapError::NoSkeletonSelected)?;
            print!("{}", order_listing(&skeleton, &table.tasks));
        }

        Commands::Check { input, format } => {
            let table = load_tasks(input.tasks.as_deref())?;
            let skeleton = input
                .load_skeleton()?
                .ok_or(RemapError::NoSkeletonSelected)?;

            let problems = validate_tasks(&skeleton, &table.tasks);
            match format {
                Format::Text => {
                    for problem in &problems {
                        println!("{}", problem);
                    }
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&problems)?),
            }
            if !problems.is_empty() {
                anyhow::bail!("{} of {} tasks would be skipped", problems.len(), table.tasks.len());
            }
            tracing::info!("All {} tasks are valid", table.tasks.len());
        }
    }

    Ok(())
}
