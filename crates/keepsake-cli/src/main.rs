//! Keepsake CLI
//!
//! Headless wrapper around keepsake-core for rendering and simulating pages
//! from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # How long it has been since the counter start
//! keepsake elapsed
//! keepsake elapsed --at 2024-04-04T12:00:00
//!
//! # Mount a page and print its document tree
//! keepsake render --page reasons --seed 7
//!
//! # Let virtual time run before printing
//! keepsake render --page moments --seed 7 --advance-ms 3000
//!
//! # Deal a gallery of five cards
//! keepsake shuffle --count 5 --seed 42
//!
//! # Validate a site config file
//! keepsake check-config site.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use keepsake_core::config::GalleryConfig;
use keepsake_core::effects::gallery::Gallery;
use keepsake_core::{site, Document, Elapsed, NodeId, Page, PageKind, SiteConfig, Tag};

/// Keepsake - headless page renderer
#[derive(Parser)]
#[command(name = "keepsake")]
#[command(version = "0.1.0")]
#[command(about = "Keepsake - render and simulate keepsake pages headlessly")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Site config file (JSON). Built-in defaults when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the time elapsed since the counter start
    Elapsed {
        /// Moment to measure to (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// List the pages of the site
    Pages,

    /// Mount a page and print its document tree
    Render {
        /// Page to render
        #[arg(short, long)]
        page: PageKind,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Virtual milliseconds to run before printing
        #[arg(long, default_value_t = 0)]
        advance_ms: u64,

        /// Wall clock the page starts at (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// Shuffle a gallery of numbered cards and print the deal
    Shuffle {
        /// Number of cards
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Validate a site config file
    CheckConfig {
        /// Path to the JSON file
        path: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Parse a local timestamp, with either `T` or a space between date and time
fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("Invalid timestamp '{}': {} (expected YYYY-MM-DDTHH:MM:SS)", s, e))
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Elapsed { at } => {
            let config = load_config(cli.config.as_deref())?;
            let start = config.counter.start;
            let elapsed = Elapsed::between(start, at.unwrap_or_else(now));
            let [days, hours, minutes, seconds] = elapsed.fields();

            println!("Since {}", start.format("%Y-%m-%d %H:%M:%S"));
            println!("  Days:    {}", days);
            println!("  Hours:   {}", hours);
            println!("  Minutes: {}", minutes);
            println!("  Seconds: {}", seconds);
        }

        Commands::Pages => {
            for kind in PageKind::ALL {
                println!("{:<10} {}", kind.slug(), kind.label());
            }
        }

        Commands::Render {
            page,
            seed,
            advance_ms,
            at,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let doc = site::build(page, &config);
            let mut builder = Page::builder(doc, config).wall_epoch(at.unwrap_or_else(now));
            if let Some(seed) = seed {
                builder = builder.seed(seed);
            }
            let mut mounted = builder.mount();

            let fired = mounted.advance(Duration::from_millis(advance_ms));
            tracing::info!("Advanced {}ms, {} timers fired", advance_ms, fired);

            let features: Vec<&str> = mounted.features().iter().map(|f| f.name()).collect();
            println!("Page: {}", page);
            println!("Features: {}", features.join(", "));
            println!("Pending timers: {}", mounted.pending_timers());
            println!();
            print!("{}", mounted.document().render_tree());
        }

        Commands::Shuffle { count, seed } => {
            let config = match cli.config.as_deref() {
                Some(path) => load_config(Some(path))?.gallery,
                None => GalleryConfig::default(),
            };
            let rng = match seed {
                Some(seed) => rand::SeedableRng::seed_from_u64(seed),
                None => rand::SeedableRng::from_os_rng(),
            };
            for line in deal(count, rng, &config) {
                println!("{}", line);
            }
        }

        Commands::CheckConfig { path } => {
            let config = SiteConfig::load(&path)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            println!("Config OK: {}", path.display());
            println!("  Title:     {}", config.title);
            println!("  Moments:   {}", config.moments.len());
            println!("  Songs:     {}", config.songs.len());
            println!("  Reasons:   {}", config.reasons.len());
            println!("  Particles: {}", config.particles.count);
            println!("  Popups:    {} messages", config.popups.messages.len());
        }
    }

    Ok(())
}

/// Shuffle `count` numbered cards once and describe the resulting order
fn deal(count: usize, mut rng: rand::rngs::StdRng, config: &GalleryConfig) -> Vec<String> {
    let mut doc = Document::new();
    let root = doc.root();
    let container = doc.append_element(root, Tag::Div, &["gallery-container"]);
    let trigger = doc.append_element(root, Tag::Button, &[]);
    let cards: Vec<NodeId> = (0..count)
        .map(|_| doc.append_element(container, Tag::Div, &["polaroid"]))
        .collect();

    let gallery = Gallery::new(container, trigger);
    gallery
        .shuffle(&mut doc, &mut rng, config)
        .into_iter()
        .enumerate()
        .map(|(slot, (card, rotation))| {
            let number = cards.iter().position(|c| *c == card).map_or(0, |i| i + 1);
            format!("{:>3}. card {:<3} rotate({:.3}deg)", slot + 1, number, rotation)
        })
        .collect()
}
