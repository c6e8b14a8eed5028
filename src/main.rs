use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use soundvibes::app::cli::Args;
use soundvibes::app::config::{AppConfig, UserConfig};
use soundvibes::app::events::AppEvent;
use soundvibes::app::schedule::Periodic;
use soundvibes::app::{inputs, App, ArtworkRequest, ArtworkState, CatalogRequest, MediaRequest};
use soundvibes::artwork::ArtworkRenderer;
use soundvibes::audio::{self, RemoteMedia, SampleTap, SpectrumSource};
use soundvibes::catalog::{CatalogLoader, CatalogSource, MediaBase};
use soundvibes::logging;
use soundvibes::player::PlaybackEngine;
use soundvibes::ui;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

fn spawn_catalog_fetch(loader: &Arc<CatalogLoader>, req: CatalogRequest, tx: &mpsc::Sender<AppEvent>) {
    let loader = loader.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let catalog = loader.load().await;
        let _ = tx
            .send(AppEvent::CatalogLoaded {
                generation: req.generation,
                mood: req.mood,
                catalog,
            })
            .await;
    });
}

fn spawn_media_fetch(
    media: &RemoteMedia,
    client: &reqwest::Client,
    req: MediaRequest,
    tx: &mpsc::Sender<AppEvent>,
) {
    let media = media.clone();
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = media
            .fetch(&client, &req.src)
            .await
            .map_err(|e| e.to_string());
        let _ = tx
            .send(AppEvent::MediaLoaded {
                generation: req.generation,
                result,
            })
            .await;
    });
}

fn spawn_artwork_fetch(
    renderer: &Arc<ArtworkRenderer>,
    req: ArtworkRequest,
    tx: &mpsc::Sender<AppEvent>,
) {
    let renderer = renderer.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let artwork = match renderer.load(&req.src).await {
            Ok(img) => ArtworkState::Loaded(img),
            Err(e) => {
                tracing::debug!(src = %req.src, error = %e, "artwork unavailable");
                ArtworkState::Failed
            }
        };
        let _ = tx
            .send(AppEvent::ArtworkLoaded {
                generation: req.generation,
                artwork,
            })
            .await;
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    // Leave the alternate screen before the panic report prints
    let report_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        report_panic(info);
    }));

    let args = Args::parse();

    if args.generate_config {
        println!("{}", toml::to_string_pretty(&UserConfig::default())?);
        return Ok(());
    }

    let (mut config, state) = AppConfig::load();
    if let Some(catalog) = &args.catalog {
        config.catalog = catalog.clone();
    }

    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("soundvibes: logging disabled: {:#}", e);
            None
        }
    };

    // Performance Optimization: Global HTTP Client (Reused)
    let client = reqwest::Client::builder()
        .user_agent(concat!("soundvibes/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default();

    let mut loader = CatalogLoader::new(client.clone(), CatalogSource::parse(&config.catalog)?);
    if let Some(root) = &config.media_root {
        loader = loader.with_media_base(MediaBase::parse(root)?);
    }
    let loader = Arc::new(loader);
    let renderer = Arc::new(ArtworkRenderer::new(client.clone()));

    let tap = SampleTap::new();
    let media = RemoteMedia::new();
    let (backend, output_error) = audio::open_output(tap.clone(), media.clone());
    let engine = PlaybackEngine::new(backend, args.volume.unwrap_or(state.volume));
    let spectrum = SpectrumSource::new(tap, config.visualizer.fft_size);

    let mut app = App::new(
        engine,
        Box::new(spectrum),
        &config,
        ui::theme::load_current_theme(),
    )
    .with_remote_media(media.clone());
    if let Some(e) = output_error {
        app.show_toast(&format!("🔇 No audio output: {}", e));
    }
    if let Some(mood) = args.mood.or(state.last_mood) {
        app.select_mood(Some(mood));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let fetchers = Fetchers {
        loader,
        renderer,
        media,
        client,
    };
    let result = run(&mut terminal, &mut app, &config, &fetchers).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    // Save state on exit
    app.save_state();
    tracing::info!("bye");

    result
}

/// Everything the event loop hands async work to
struct Fetchers {
    loader: Arc<CatalogLoader>,
    renderer: Arc<ArtworkRenderer>,
    media: RemoteMedia,
    client: reqwest::Client,
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    config: &UserConfig,
    fetchers: &Fetchers,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Housekeeping, position poll and equalizer frames ⚡
    let mut ticks = Periodic::new(Duration::from_millis(config.tick_interval_ms), || {
        AppEvent::Tick
    });
    let mut poll = Periodic::new(Duration::from_millis(config.poll_interval_ms), || {
        AppEvent::PositionPoll
    });
    let mut frames = Periodic::new(
        Duration::from_millis(config.visualizer.frame_interval_ms),
        || AppEvent::Frame,
    );
    ticks.start(&tx);
    poll.start(&tx);

    loop {
        if let Some(req) = app.take_catalog_request() {
            spawn_catalog_fetch(&fetchers.loader, req, &tx);
        }
        if let Some(req) = app.take_media_request() {
            spawn_media_fetch(&fetchers.media, &fetchers.client, req, &tx);
        }
        if let Some(req) = app.take_artwork_request() {
            spawn_artwork_fetch(&fetchers.renderer, req, &tx);
        }
        frames.sync(app.visualizer.is_scheduled(), &tx);

        terminal.draw(|f| ui::ui(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Input(event) => inputs::handle_event(event, app),
            AppEvent::Tick => app.on_tick(),
            AppEvent::PositionPoll => app.poll_position(),
            AppEvent::Frame => app.on_frame(),
            AppEvent::CatalogLoaded {
                generation,
                mood,
                catalog,
            } => app.on_catalog_loaded(generation, mood, catalog),
            AppEvent::MediaLoaded { generation, result } => {
                app.on_media_loaded(generation, result)
            }
            AppEvent::ArtworkLoaded {
                generation,
                artwork,
            } => app.on_artwork_loaded(generation, artwork),
        }

        if !app.is_running {
            break;
        }
    }

    app.stop();
    Ok(())
}
