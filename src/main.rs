//! Folio - A terminal viewer for portfolio decks.
//!
//! # Usage
//!
//! ```bash
//! folio
//! folio deck.json
//! folio --watch --transition-ms 250 deck.json
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use folio::app::App;
use folio::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use folio::perf;
use folio::ui::CARD_PITCH;

/// A terminal viewer for portfolio decks with an infinite feature carousel
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Deck JSON file to view (the built-in deck when omitted)
    #[arg(value_name = "DECK")]
    deck: Option<PathBuf>,

    /// Watch the deck file and reload on change
    #[arg(short, long)]
    watch: bool,

    /// Move the carousel without animating
    #[arg(long)]
    no_animation: bool,

    /// Log timing of startup, reloads and frames
    #[arg(long)]
    perf: bool,

    /// Colour theme (auto reads COLORFGBG)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Carousel transition length in milliseconds
    #[arg(long, value_name = "MS")]
    transition_ms: Option<u64>,

    /// Carousel safety band half-width, in list repetitions
    #[arg(long, value_name = "K")]
    tolerance: Option<usize>,

    /// Number of list copies in the virtual card sequence
    #[arg(long, value_name = "M")]
    repeat: Option<usize>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            watch: self.watch,
            no_animation: self.no_animation,
            perf: self.perf,
            theme: self.theme,
            transition_ms: self.transition_ms,
            tolerance: self.tolerance,
            repeat: self.repeat,
            debug_log: self.debug_log.clone(),
        }
    }
}

fn init_tracing(flags: &ConfigFlags) -> Result<()> {
    let base = if flags.debug_log.is_some() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let mut filter = EnvFilter::from_default_env().add_directive(base.into());
    if flags.perf {
        filter = filter.add_directive("folio::perf=info".parse()?);
    }

    match &flags.debug_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(&effective)?;
    perf::set_enabled(effective.perf);

    let carousel_config = effective.carousel_config(CARD_PITCH);
    carousel_config
        .validate()
        .context("Invalid carousel settings")?;
    tracing::debug!(?carousel_config, "effective settings");

    if let Some(path) = cli.deck.as_ref().filter(|p| !p.exists()) {
        anyhow::bail!("Deck not found: {}", path.display());
    }

    let app = App::new(cli.deck)
        .with_carousel_config(carousel_config)
        .with_watch(effective.watch)
        .with_theme(effective.theme.unwrap_or(ThemeMode::Auto))
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
