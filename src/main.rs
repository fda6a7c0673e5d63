use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_transfer::Rect;
use recolor::models::{
    parse_bounds, AppConfig, ConfigOverrides, GridConfig, TransferMode, DEFAULT_CONFIG_YAML,
};
use recolor::services::TransferPipeline;

#[derive(Parser)]
#[command(name = "recolor")]
#[command(about = "Colorize grayscale images by transferring color from a reference image")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Inputs and tunables shared by both transfer modes
#[derive(Args)]
struct CommonArgs {
    /// Color reference image (PNG)
    #[arg(short, long)]
    source: PathBuf,

    /// Grayscale image to colorize (PNG)
    #[arg(short, long)]
    target: PathBuf,

    /// Output PNG file path
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Side of the local contrast window (odd)
    #[arg(long)]
    neighborhood: Option<usize>,

    /// Sampling grid as ROWSxCOLS, e.g. 15x15
    #[arg(long, conflicts_with = "samples")]
    grid: Option<GridConfig>,

    /// Approximate number of jittered samples
    #[arg(long)]
    samples: Option<usize>,
}

impl CommonArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed: self.seed,
            neighborhood_window: self.neighborhood,
            grid: self.grid,
            samples: self.samples,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Colorize the target using statistics of the whole source image
    Transfer {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Colorize the target guided by user-selected swatch pairs
    Swatch {
        #[command(flatten)]
        common: CommonArgs,

        /// Source swatch as x1,y1,x2,y2 (repeatable, paired in order)
        #[arg(long = "source-swatch", value_parser = parse_bounds)]
        source_swatches: Vec<Rect>,

        /// Target swatch as x1,y1,x2,y2 (repeatable, paired in order)
        #[arg(long = "target-swatch", value_parser = parse_bounds)]
        target_swatches: Vec<Rect>,

        /// Side of the texture synthesis window (odd)
        #[arg(long)]
        synthesis_window: Option<usize>,
    },
    /// Write a default configuration file
    Init {
        /// Destination path (.yaml or .json)
        #[arg(long, short, default_value = "config.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Transfer { common }) => {
            init_tracing();
            let config = load_config(&common, common.overrides())?;
            run_transfer(TransferMode::WholeImage, config, &common)
        }
        Some(Commands::Swatch {
            common,
            source_swatches,
            target_swatches,
            synthesis_window,
        }) => {
            init_tracing();
            let overrides = ConfigOverrides {
                synthesis_window,
                source_swatches,
                target_swatches,
                ..common.overrides()
            };
            let config = load_config(&common, overrides)?;
            run_transfer(TransferMode::SwatchGuided, config, &common)
        }
        Some(Commands::Init { path, force }) => run_init_command(&path, force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recolor=info,color_transfer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load the config file (flag, then CONFIG_FILE) and apply CLI overrides.
fn load_config(common: &CommonArgs, overrides: ConfigOverrides) -> anyhow::Result<AppConfig> {
    let path = common
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let mut config = AppConfig::load_or_default(path.as_deref())?;
    config.apply_overrides(&overrides)?;
    Ok(config)
}

fn run_transfer(mode: TransferMode, config: AppConfig, common: &CommonArgs) -> anyhow::Result<()> {
    let pipeline = TransferPipeline::new(config);
    let output = pipeline.run(mode, &common.source, &common.target, &common.output)?;

    let result = &output.result;
    match result.colorized() {
        Some(mask) => println!(
            "Colorized {} ({}x{}, {} pixels from swatches)",
            common.output.display(),
            result.width(),
            result.height(),
            mask.count()
        ),
        None => println!(
            "Colorized {} ({}x{})",
            common.output.display(),
            result.width(),
            result.height()
        ),
    }
    Ok(())
}

fn run_init_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!(
            "Skipped {} (already exists, use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let content = if is_json {
        serde_json::to_string_pretty(&AppConfig::default())?
    } else {
        DEFAULT_CONFIG_YAML.to_string()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("recolor v{VERSION}");
    println!("Grayscale image colorization by color transfer\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("recolor=info,color_transfer=info (default)")
    );

    println!("\nCommands:");
    println!("  recolor transfer -s SOURCE -t TARGET -o OUTPUT");
    println!("  recolor swatch   -s SOURCE -t TARGET -o OUTPUT --source-swatch x1,y1,x2,y2 --target-swatch x1,y1,x2,y2");
    println!("  recolor init [--path config.yaml]");
    println!("\nRun 'recolor --help' for all options.");
}
