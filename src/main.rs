use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use animestream_lib::api::{HiAnimeClient, RailKind};
use animestream_lib::app::{App, AsyncAction};
use animestream_lib::config::AppConfig;
use animestream_lib::focus::NavigationStyle;
use animestream_lib::handlers::async_actions::{handle_async_action, spawn_request};
use animestream_lib::handlers::mouse::handle_mouse_event;
use animestream_lib::ui;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Browse the HiAnime catalog from your terminal", long_about = None)]
struct Args {
    /// Base URL of the HiAnime API (overrides config and ANIMESTREAM_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Skip the network and browse the built-in catalog
    #[arg(long)]
    offline: bool,

    /// Seconds between spotlight slides (0 disables rotation)
    #[arg(long)]
    spotlight_secs: Option<u64>,

    /// Edge behavior when moving past the end of a row: "wrap" or "edge"
    #[arg(long)]
    navigation: Option<NavigationStyle>,

    /// Fetch the home page once, print a summary and exit
    #[arg(long)]
    check: bool,

    /// Write logs here instead of the data directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_logging(path: Option<PathBuf>) -> Option<WorkerGuard> {
    let path = path.or_else(|| AppConfig::data_dir().map(|d| d.join("animestream.log")))?;
    let dir = path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let file = path.file_name()?.to_owned();
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("animestream=info,animestream_lib=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn apply_args(config: &mut AppConfig, args: &Args) {
    if let Some(url) = &args.api_url {
        config.api_base_url = url.trim().to_string();
    }
    if args.offline {
        config.offline = true;
    }
    if let Some(secs) = args.spotlight_secs {
        config.spotlight_interval_secs = secs;
    }
    if let Some(style) = args.navigation {
        config.navigation = style;
    }
}

async fn check(config: &AppConfig) -> Result<(), anyhow::Error> {
    let client = HiAnimeClient::new(config)?;
    println!("Fetching home page from {}...", client.base_url());
    let (home, source) = client.get_home_page().await;
    let data = &home.data;
    println!("Source: {}", source.label());
    println!("Spotlight: {}", data.spotlight_animes.len());
    for kind in RailKind::ALL {
        println!("{}: {}", kind.title(), data.rail(kind).len());
    }
    println!(
        "Top 10: {} / {} / {}",
        data.top10_animes.today.len(),
        data.top10_animes.week.len(),
        data.top10_animes.month.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();

    let _guard = init_logging(args.log_file.clone());

    let mut config = AppConfig::load()?;
    apply_args(&mut config, &args);
    tracing::info!(api = %config.api_base_url, offline = config.offline, "Starting animestream");

    // -- CLI MODE --
    if args.check {
        return check(&config).await;
    }

    // -- TUI MODE (Default) --
    let client = HiAnimeClient::new(&config)?;

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App State
    let mut app = App::new(config);

    // Async Channel
    let (tx, mut rx) = mpsc::channel::<AsyncAction>(32);

    let res = run_app(&mut terminal, &mut app, &client, tx, &mut rx).await;

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "Terminal loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &HiAnimeClient,
    tx: mpsc::Sender<AsyncAction>,
    rx: &mut mpsc::Receiver<AsyncAction>,
) -> io::Result<()> {
    let first = app.start();
    spawn_request(client, first, &tx);

    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // 1. Drain finished requests (Non-blocking)
        while let Ok(action) = rx.try_recv() {
            handle_async_action(app, action);
        }

        // 2. Animations and spotlight rotation
        app.tick(Instant::now());

        // 3. Input
        if event::poll(Duration::from_millis(100))? {
            let request = match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => None,
            };
            if let Some(request) = request {
                spawn_request(client, request, &tx);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
