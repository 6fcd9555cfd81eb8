//! infiniscroll entrypoint: a headless host for the windowed list.
//!
//! Builds one scroll session over placeholder items, replays a scroll
//! script as boundary notifications and prints the window after each step.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{ListConfig, load_from};
use core_render::MemorySurface;
use core_scroll::{ScrollController, ScrollState, Transition};
use core_store::{Placeholder, PlaceholderItem};
use core_watch::{ObservedSet, VisibilityChange};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod script;
use script::{Script, Step};

/// Used when the terminal size cannot be probed.
const FALLBACK_VIEWPORT_HEIGHT: f64 = 1_000.0;

type Session = ScrollController<Placeholder, MemorySurface<PlaceholderItem>, ObservedSet>;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "infiniscroll", version, about = "Windowed list scroll simulator")]
struct Args {
    /// Scroll script: l = last edge visible, f = first edge visible,
    /// b = both edges in one batch, e = to end, s = to start.
    #[arg(default_value = "llf")]
    script: Script,
    /// Number of logical items.
    #[arg(long, default_value_t = 10_000)]
    items: usize,
    /// Viewport height override (defaults to config, then terminal rows * item height).
    #[arg(long = "viewport-height")]
    viewport_height: Option<f64>,
    /// Optional configuration file path (overrides discovery of `infiniscroll.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("infiniscroll.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "infiniscroll.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Host viewport: one terminal row per item.
fn host_viewport_height(item_height: f64) -> f64 {
    match crossterm::terminal::size() {
        Ok((_, rows)) if rows > 0 => f64::from(rows) * item_height,
        Ok(_) => FALLBACK_VIEWPORT_HEIGHT,
        Err(e) => {
            warn!(target: "runtime", ?e, "terminal_size_unavailable");
            FALLBACK_VIEWPORT_HEIGHT
        }
    }
}

fn run_step(session: &mut Session, step: Step) -> Vec<Transition> {
    let Some(pair) = session.boundary() else {
        return Vec::new();
    };
    match step {
        Step::Last => session.on_visibility(&[VisibilityChange::entered(pair.last)]),
        Step::First => session.on_visibility(&[VisibilityChange::entered(pair.first)]),
        Step::Both => session.on_visibility(&[
            VisibilityChange::entered(pair.first),
            VisibilityChange::entered(pair.last),
        ]),
        Step::ToEnd => repeat_until(session, ScrollState::AtEnd, Session::on_last_visible),
        Step::ToStart => repeat_until(session, ScrollState::AtStart, Session::on_first_visible),
    }
}

fn repeat_until(
    session: &mut Session,
    target: ScrollState,
    mut step: impl FnMut(&mut Session) -> Transition,
) -> Vec<Transition> {
    let mut applied = Vec::new();
    while session.state() != target {
        let t = step(session);
        applied.push(t);
        if !t.moved() {
            break;
        }
    }
    applied
}

fn print_window(session: &Session, label: &str, moves: usize) {
    let spacers = session.spacers();
    let range = session
        .boundary()
        .map(|p| format!("{}..={}", p.first_index, p.last_index))
        .unwrap_or_else(|| "empty".to_string());
    println!(
        "{label:>6} page={:<4} state={:<8} top={:<9} bottom={:<9} items={range} slots={} moves={moves}",
        session.page_index(),
        session.state().as_str(),
        spacers.top,
        spacers.bottom,
        session.materialized(),
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let list = ListConfig {
        viewport_height: args.viewport_height.or(config.file.list.viewport_height),
        ..config.file.list.clone()
    };
    let host_height = host_viewport_height(list.item_height);
    let mut session = ScrollController::from_config(
        &list,
        host_height,
        Placeholder::new(args.items),
        MemorySurface::new(),
        ObservedSet::new(),
        config.file.watch.batch_policy,
    )
    .context("invalid list configuration")?;
    info!(
        target: "runtime.startup",
        items = args.items,
        steps = args.script.0.len(),
        config_override = args.config.is_some(),
        config_source = ?config.source,
        "bootstrap_complete"
    );

    let geometry = session.renderer().geometry();
    println!(
        "items={} item_height={} viewport_height={} window_size={} page_size={} max_page={}",
        args.items,
        geometry.item_height(),
        geometry.viewport_height(),
        geometry.window_size(),
        geometry.page_size(),
        session.max_page_index(),
    );
    print_window(&session, "init", 0);
    for step in &args.script.0 {
        let applied = run_step(&mut session, *step);
        let moves = applied.iter().filter(|t| t.moved()).count();
        print_window(&session, step.label(), moves);
    }

    session.shutdown();
    info!(target: "runtime", "shutdown");
    Ok(())
}
