use clap::Parser;
use roompanel::{
    ChannelSink, RoomInfo, RoomPanel, Store, Theme,
    config::Config,
    input::{LineOutcome, handle_line},
    renderer::{RenderOptions, render_ansi},
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Show the room panel in the terminal.
///
/// Reads stdin line by line: a line starting with `{` is a room update
/// (JSON), anything else is taken as an exit to leave through.
#[derive(Parser, Debug)]
#[command(name = "roompanel", version)]
struct Args {
    /// Initial room document (JSON)
    #[arg(long)]
    room: Option<PathBuf>,

    /// Theme file (TOML)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Config file (TOML); environment is used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Terminal width
    #[arg(long)]
    width: Option<usize>,

    /// Do not emit ANSI colours
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(width) = args.width {
        cfg.width = width;
    }
    if args.no_color {
        cfg.color = false;
    }
    if let Some(theme) = args.theme {
        cfg.theme_path = Some(theme);
    }

    let theme = match &cfg.theme_path {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };
    let panel = RoomPanel::new(Arc::new(theme));
    let store = Store::new();
    if let Some(path) = &args.room {
        store.set_room_info(RoomInfo::load(path)?);
    }
    tracing::info!(width = cfg.width, color = cfg.color, "room panel started");

    let opts = RenderOptions {
        width: cfg.width,
        color: cfg.color,
    };

    let render_panel = panel.clone();
    let subscription = store.subscribe();
    let render_jh = tokio::spawn(async move {
        render_panel
            .run(subscription, |tree| {
                print!("{}", render_ansi(&tree, &opts));
            })
            .await;
    });

    let (sink, mut commands) = ChannelSink::channel();
    let command_jh = tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            println!("> {command}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match handle_line(&line, &store, &panel, &sink) {
            LineOutcome::BadUpdate(e) => tracing::warn!(error = %e, "ignoring bad room update"),
            LineOutcome::NoSuchExit(direction) => tracing::warn!(%direction, "no such exit"),
            LineOutcome::Skipped | LineOutcome::RoomUpdated { .. } | LineOutcome::Sent(_) => {}
        }
    }

    // closing the store and the sink lets both tasks finish
    drop(store);
    drop(sink);
    if let Err(e) = tokio::try_join!(render_jh, command_jh) {
        tracing::error!(error = %e, "panel task failed");
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporter: {e}");
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,roompanel=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();
}
