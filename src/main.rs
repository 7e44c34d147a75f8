//! # Moire CLI
//!
//! Command-line front-end for generating moiré images.
//!
//! ## Usage
//!
//! ```bash
//! # List available pattern modes
//! moire modes
//!
//! # Checkerboard overlaid with a slightly rotated copy
//! moire render --mode squares --pixel-size 4 --rotate 3 --png squares.png
//!
//! # Random dots at 35% density, reproducible
//! moire render --density 35 --seed 42 --scale 1.02 --png dots.png
//!
//! # Start from the saved preferences and remember this run
//! moire render --from-prefs --translate-x 12 --save-prefs --png out.png
//!
//! # Inspect or reset the saved preferences
//! moire prefs show
//! moire prefs reset
//! ```

use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use moire::{
    ImageSettings, MoireError, MoireSession, PatternMode, Rgba,
    prefs::{FilePreferences, PreferenceStore},
    settings::{MAX_DIMENSION, MIN_DIMENSION},
};

/// Moire - Interference pattern generator
#[derive(Parser, Debug)]
#[command(name = "moire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Preference file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    prefs_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pattern modes
    Modes,

    /// Generate a moiré image and save it as PNG
    Render(RenderArgs),

    /// Inspect or reset saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Pattern mode (see `moire modes`)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<PatternMode>,

    /// Image width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_DIMENSION as i64..=MAX_DIMENSION as i64))]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_DIMENSION as i64..=MAX_DIMENSION as i64))]
    height: Option<u32>,

    /// Pattern cell size in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pixel_size: Option<u32>,

    /// Percentage of opaque cells in random mode (0-100)
    #[arg(long, value_parser = parse_density)]
    density: Option<f64>,

    /// Seed for random mode (omit for a fresh image every run)
    #[arg(long)]
    seed: Option<u64>,

    /// Overlay rotation in degrees
    #[arg(long, allow_hyphen_values = true)]
    rotate: Option<f64>,

    /// Overlay horizontal offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    translate_x: Option<f64>,

    /// Overlay vertical offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    translate_y: Option<f64>,

    /// Uniform overlay scale
    #[arg(long, value_parser = parse_scale, conflicts_with_all = ["scale_x", "scale_y"])]
    scale: Option<f64>,

    /// Horizontal overlay scale (switches to independent scaling)
    #[arg(long, value_parser = parse_scale, requires = "scale_y")]
    scale_x: Option<f64>,

    /// Vertical overlay scale (switches to independent scaling)
    #[arg(long, value_parser = parse_scale, requires = "scale_x")]
    scale_y: Option<f64>,

    /// Pattern color as #rrggbb or #rrggbbaa
    #[arg(long, value_parser = parse_color)]
    foreground: Option<Rgba>,

    /// Background color as #rrggbb or #rrggbbaa
    #[arg(long, value_parser = parse_color)]
    background: Option<Rgba>,

    /// Start from the saved preferences instead of the defaults
    #[arg(long)]
    from_prefs: bool,

    /// Save the resulting settings as the new preferences
    #[arg(long)]
    save_prefs: bool,

    /// Output PNG file (".png" is appended if missing)
    #[arg(long, value_name = "FILE")]
    png: PathBuf,
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Print every saved preference
    Show,
    /// Delete every saved preference
    Reset,
    /// Print the preference file location
    Path,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MoireError> {
    let cli = Cli::parse();

    // RUST_LOG overrides either default
    let env = if cli.verbose {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Modes => {
            println!("Available modes:");
            for mode in PatternMode::ALL {
                let note = if mode.uses_density() { " (uses --density)" } else { "" };
                println!("  {:<18} {}{}", mode.name(), mode.label(), note);
            }
        }
        Commands::Render(args) => render(args, cli.prefs_file)?,
        Commands::Prefs { action } => {
            let mut store = open_prefs(cli.prefs_file)?;
            match action {
                PrefsAction::Show => {
                    for key in store.keys() {
                        if let Some(value) = store.get(&key) {
                            println!("{} = {}", key, value);
                        }
                    }
                }
                PrefsAction::Reset => {
                    store.clear();
                    store.flush()?;
                    println!("Preferences reset ({})", store.path().display());
                }
                PrefsAction::Path => println!("{}", store.path().display()),
            }
        }
    }

    Ok(())
}

fn render(args: RenderArgs, prefs: Option<PathBuf>) -> Result<(), MoireError> {
    let mut store = if args.from_prefs || args.save_prefs {
        Some(open_prefs(prefs)?)
    } else {
        None
    };

    let mut session = match store.as_ref().filter(|_| args.from_prefs) {
        Some(store) => MoireSession::load(store)?,
        None => MoireSession::new(apply_image_args(ImageSettings::default(), &args))?,
    };
    let settings = apply_image_args(session.settings().clone(), &args);

    println!("Generating {}...", settings);
    session.set_image_settings(settings)?;

    let ctl = session.transform_mut();
    if let Some(deg) = args.rotate {
        ctl.set_rotation(deg);
    }
    if args.translate_x.is_some() || args.translate_y.is_some() {
        let state = *ctl.state();
        ctl.set_translation(
            args.translate_x.unwrap_or(state.translate_x),
            args.translate_y.unwrap_or(state.translate_y),
        );
    }
    if let Some(scale) = args.scale {
        ctl.set_common_scale(scale);
        ctl.set_use_common_scale(true);
    }
    if let (Some(sx), Some(sy)) = (args.scale_x, args.scale_y) {
        ctl.set_independent_scale(sx, sy);
        ctl.set_use_common_scale(false);
    }
    if let Some(color) = args.foreground {
        session.set_foreground(color);
    }
    if let Some(color) = args.background {
        session.set_background(color);
    }

    let written = session.export(&args.png)?;
    println!("Saved to {}", written.display());

    if args.save_prefs {
        if let Some(store) = store.as_mut() {
            session.store(store);
            store.flush()?;
            println!("Preferences saved to {}", store.path().display());
        }
    }

    Ok(())
}

fn apply_image_args(mut settings: ImageSettings, args: &RenderArgs) -> ImageSettings {
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(size) = args.pixel_size {
        settings.pixel_size = size;
    }
    if let Some(density) = args.density {
        settings.pixel_density = density;
    }
    settings.seed = args.seed;
    settings
}

fn open_prefs(path: Option<PathBuf>) -> Result<FilePreferences, MoireError> {
    match path {
        Some(path) => FilePreferences::open(path),
        None => FilePreferences::open_default(),
    }
}

fn parse_mode(s: &str) -> Result<PatternMode, String> {
    PatternMode::by_name(s).ok_or_else(|| {
        let names: Vec<&str> = PatternMode::ALL.iter().map(|m| m.name()).collect();
        format!("unknown mode '{}', expected one of: {}", s, names.join(", "))
    })
}

fn parse_density(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("density must be between 0 and 100, got {}", value))
    }
}

fn parse_scale(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("scale must be a non-negative number, got {}", s))
    }
}

fn parse_color(s: &str) -> Result<Rgba, String> {
    Rgba::from_hex(s).map_err(|e| e.to_string())
}
