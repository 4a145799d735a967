//! One Dark theme generator CLI
//!
//! Usage:
//!   onedark-themegen [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build      Regenerate all four themes into a cleared assets directory
//!   generate   Write one theme with custom style preferences
//!   identify   Print the theme name for a host theme identifier
//!
//! Options:
//!   -c, --config <FILE>     Generator configuration (TOML format)
//!   -t, --templates <DIR>   Directory holding templates and palettes
//!   -o, --out <DIR>         Directory generated themes are written into
//!   -v, --verbose           Log every resolution step

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use onedark_themegen::settings::{FileStore, PreferencesStore};
use onedark_themegen::style::is_managed_theme;
use onedark_themegen::{build_all, write_theme, GeneratorConfig, Preferences, ThemeIdentity};

#[derive(Parser)]
#[command(name = "onedark-themegen")]
#[command(about = "Generate One Dark editor schemes from parameterized templates")]
struct Cli {
    /// Generator configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the scheme template, palettes and metadata template
    #[arg(short, long, global = true)]
    templates: Option<PathBuf>,

    /// Directory generated themes are written into
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    /// Log every resolution step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clear the assets directory and regenerate all four themes
    Build,

    /// Write a single theme with custom style preferences
    Generate(GenerateArgs),

    /// Print the display name for a theme identifier
    Identify {
        /// Opaque theme identifier reported by the host
        id: String,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Theme identifier or display name, e.g. "One Dark Italic"
    #[arg(long, default_value = "One Dark")]
    theme: String,

    /// Stored preferences (TOML); flags below are added on top
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Bold keywords
    #[arg(long)]
    bold: bool,

    /// Italic keywords, comments and attributes
    #[arg(long)]
    italic: bool,

    /// Use the vivid palette
    #[arg(long)]
    vivid: bool,

    /// Persist the resulting preferences back to --preferences
    #[arg(long, requires = "preferences")]
    save: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .map_err(|e| format!("loading config '{}': {}", path.display(), e))?,
        None => GeneratorConfig::default(),
    };
    if let Some(dir) = cli.templates {
        config = config.with_templates_dir(dir);
    }
    if let Some(dir) = cli.out {
        config = config.with_assets_dir(dir);
    }

    match cli.command {
        Command::Build => {
            let written = build_all(&config)?;
            for path in &written {
                println!("{}", path.display());
            }
        }
        Command::Generate(args) => generate(&config, args)?,
        Command::Identify { id } => {
            let identity = ThemeIdentity::lookup(&id)?;
            let managed = if is_managed_theme(identity) { " (managed)" } else { "" };
            println!("{}{}", identity.display_name, managed);
        }
    }
    Ok(())
}

fn generate(config: &GeneratorConfig, args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let identity = ThemeIdentity::lookup(&args.theme)?;

    let mut store = args.preferences.map(FileStore::new);
    let stored = match &store {
        Some(store) => store.load_preferences()?,
        None => Preferences::default(),
    };
    let preferences = Preferences {
        is_bold: stored.is_bold || args.bold,
        is_vivid: stored.is_vivid || args.vivid,
        is_italic: stored.is_italic || args.italic,
    };

    if args.save {
        if let Some(store) = store.as_mut() {
            let path = store.path().display().to_string();
            store.on_preferences_changed(Box::new(move |_: &Preferences| info!(path = %path, "preferences updated")));
            store.save_preferences(preferences)?;
        }
    }

    for path in write_theme(identity, &preferences, config)? {
        println!("{}", path.display());
    }
    Ok(())
}
