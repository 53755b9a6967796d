mod action;
mod app;
mod app_state;
mod component;
mod components;
mod player;
mod theme;
mod widgets;

use std::sync::Arc;

use clap::Parser;

use slang_core::audio::{AudioBackend, AudioBase};
use slang_core::config::Config;
use slang_core::dictionary::Dictionary;
use slang_core::favorites::FavoritesRegistry;
use slang_core::filter::normalize_language_param;
use slang_core::kv::FileStore;
use slang_core::store::{DataSource, DataStore};

use crate::action::Page;
use crate::player::{MpvPlayer, NoPlayer};

/// Browse, search and listen to Zambian slang in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Open the dictionary filtered to this language (e.g. bemba)
    #[arg(long)]
    lang: Option<String>,

    /// Slang data: URL or path to a JSON file
    #[arg(long)]
    source: Option<String>,

    /// Directory or URL the audio clips are served from
    #[arg(long)]
    audio_base: Option<String>,

    /// Start with every matching slang listed instead of the first few
    #[arg(long)]
    show_all: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_default();
    if let Some(source) = args.source {
        config.data.source = source;
    }
    if let Some(base) = args.audio_base {
        config.audio.base = base;
    }

    let data_dir = config.paths.data_dir.clone();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("zedslangs.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("zedslangs log: {}", log_path.display());

    tracing::info!("zedslangs starting…");

    // ── Data + favorites ─────────────────────────────────────────────────────
    let source = DataSource::parse(&config.data.source);
    let store = DataStore::load(&source, config.data.fetch_timeout()).await;
    let favorites = FavoritesRegistry::load(Box::new(FileStore::new(data_dir.clone())));
    let mut dictionary = Dictionary::new(store, favorites, config.display.initial_count);

    let mut start_page = Page::Home;
    if let Some(lang) = args.lang.as_deref() {
        let language = normalize_language_param(lang);
        if !language.is_empty() {
            tracing::info!("language filter from --lang: {}", language);
            dictionary.set_language(Some(language));
            start_page = Page::Dictionary;
        }
    }
    if args.show_all {
        dictionary.toggle_view_all();
    }

    // ── Audio backend ────────────────────────────────────────────────────────
    let (backend, audio_available): (Arc<dyn AudioBackend>, bool) =
        match MpvPlayer::locate(&config.audio.player) {
            Some(player) => (Arc::new(player), true),
            None => {
                tracing::warn!("audio: {} not found, playback disabled", config.audio.player);
                (Arc::new(NoPlayer), false)
            }
        };

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        dictionary,
        backend,
        AudioBase::parse(&config.audio.base),
        audio_available,
        start_page,
    );
    app.run().await?;

    Ok(())
}
