//! Group-operation emulation generator CLI
//!
//! Main entry point for the `emugen` command.

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use emugen::{BitWidth, CommentStyle, EmuModule, GenConfig, WaveSize};

#[derive(Parser)]
#[command(name = "emugen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Generate LLVM IR emulation code for GLSL subgroup arithmetic",
    long_about = None
)]
struct Cli {
    /// Operand bit width selecting the operator table
    #[arg(value_enum, value_name = "BIT_WIDTH")]
    bit_width: WidthArg,

    /// Wave size embedded into symbol and file names
    #[arg(value_name = "WAVE_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    wave_size: u32,

    /// Directory receiving the generated module
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Generator configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// GLSL spelling used in function comments
    #[arg(long, value_enum)]
    comment_style: Option<CommentStyle>,

    /// Print the module instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Fail if the existing module differs from the generated one
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Also write a JSON manifest of the generated symbols
    #[arg(long, conflicts_with_all = ["check", "stdout"])]
    manifest: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum WidthArg {
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
    /// All three tables, one module each
    All,
}

impl WidthArg {
    fn widths(self) -> Vec<BitWidth> {
        match self {
            WidthArg::W16 => vec![BitWidth::W16],
            WidthArg::W32 => vec![BitWidth::W32],
            WidthArg::W64 => vec![BitWidth::W64],
            WidthArg::All => BitWidth::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = GenConfig::resolve(cli.config.as_deref(), cli.comment_style)?;
    let wave = WaveSize::new(cli.wave_size)?;

    for bits in cli.bit_width.widths() {
        let module = EmuModule::build(bits, wave, config.comment_style)?;
        tracing::info!(
            "Generated {} {} group operations for wave {}",
            module.len(),
            module.bits(),
            module.wave()
        );

        if cli.check {
            module.check_in(&cli.output_dir, &config)?;
            continue;
        }

        if cli.stdout {
            print!("{}", module.render(&config));
        } else {
            module.write_to(&cli.output_dir, &config)?;
        }

        if cli.manifest {
            module.write_manifest(&cli.output_dir)?;
        }
    }

    Ok(())
}
