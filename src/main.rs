#![allow(non_snake_case)]

mod app;
mod bridge;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use keepsake_core::SiteConfig;

/// Launch settings, set once from the command line
static LAUNCH: OnceLock<context::Launch> = OnceLock::new();

/// Settings the app was launched with (defaults if unset)
pub fn launch_settings() -> context::Launch {
    LAUNCH.get().cloned().unwrap_or_default()
}

/// Keepsake - a small themed personal site
#[derive(Parser, Debug)]
#[command(name = "keepsake-desktop")]
#[command(about = "Keepsake - a small themed personal site in a desktop window")]
struct Args {
    /// Site config file (JSON). Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, for a reproducible particle field and animations
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let site = match &args.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    let title = site.title.clone();

    tracing::info!(
        "Starting '{}' (config: {:?}, seed: {:?})",
        title,
        args.config,
        args.seed
    );

    let _ = LAUNCH.set(context::Launch {
        site,
        seed: args.seed,
    });

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title(&title)
            .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 860.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);

    Ok(())
}
