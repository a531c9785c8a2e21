// SPDX-License-Identifier: MPL-2.0
use message_bar::config::{self, Config, DEFAULT_DEMO_DURATION_SECS, MAX_DEMO_DURATION_SECS};
use message_bar::diagnostics::DiagnosticsCollector;
use message_bar::domain::message::{Message, MessageType};
use message_bar::infrastructure::ConsoleSurface;
use message_bar::queue::{BannerQueue, EventKind, QueueState};
use message_bar::runtime::{BannerHandle, BannerService};
use message_bar::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: message-bar [OPTIONS] TITLE...

Shows each TITLE as a banner on the terminal, one after another.

Options:
  --config PATH     Read settings from PATH instead of the user config dir
  --duration SECS   Seconds each banner stays visible
  --paused          Queue every banner before starting the queue
  --type TYPE       error, notification or success (default: error)
  --id ID           Reuse identifier shared by every banner
  -h, --help        Print this help";

struct Args {
    config: Option<PathBuf>,
    duration: Option<f64>,
    paused: bool,
    message_type: MessageType,
    reuse_identifier: Option<String>,
    titles: Vec<String>,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        duration: args.opt_value_from_str("--duration")?,
        paused: args.contains("--paused"),
        message_type: args
            .opt_value_from_str("--type")?
            .unwrap_or_default(),
        reuse_identifier: args.opt_value_from_str("--id")?,
        titles: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    };
    Ok(Some(parsed))
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        log::warn!("using default settings: {err}");
        Config::default()
    })
}

fn banner_duration(args: &Args, config: &Config) -> f64 {
    let secs = args
        .duration
        .unwrap_or_else(|| config.demo_duration_secs());
    if secs.is_finite() && secs > 0.0 {
        secs.min(MAX_DEMO_DURATION_SECS)
    } else {
        log::warn!("banners need a positive duration to finish, using {DEFAULT_DEMO_DURATION_SECS}s");
        DEFAULT_DEMO_DURATION_SECS
    }
}

fn build_messages(args: &Args, duration: f64) -> Result<Vec<Message>> {
    args.titles
        .iter()
        .map(|title| {
            Message::new(
                title,
                None,
                args.message_type,
                args.reuse_identifier.as_deref(),
                duration,
            )
        })
        .collect()
}

/// Waits until nothing is showing or pending.
async fn run_until_idle(handle: &BannerHandle) -> Result<()> {
    let (_, mut events) = handle.subscribe().await?;
    if handle.snapshot().await?.state == QueueState::Idle {
        return Ok(());
    }
    while let Some(event) = events.recv().await {
        println!("  {} {}", event.kind().label(), event.message().id());
        if event.kind() == EventKind::DidHide
            && handle.snapshot().await?.state == QueueState::Idle
        {
            return Ok(());
        }
    }
    Err(Error::ServiceStopped)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref());
    let duration = banner_duration(&args, &config);
    let messages = build_messages(&args, duration)?;

    let mut collector = DiagnosticsCollector::new(config.diagnostics_capacity());
    let mut queue = BannerQueue::with_config(ConsoleSurface::stdout(), &config);
    queue.set_diagnostics(collector.handle());

    let (handle, task) = BannerService::spawn(queue);
    if args.paused {
        handle.pause_queue()?;
    }
    for message in messages {
        handle.enqueue(message)?;
    }
    if args.paused {
        let snapshot = handle.snapshot().await?;
        println!("queue paused with {} pending", snapshot.pending.len());
        handle.start_queue()?;
    } else if !config.autostart() {
        handle.start_queue()?;
    }

    run_until_idle(&handle).await?;
    handle.shutdown()?;
    if task.await.is_err() {
        log::warn!("banner service ended abnormally");
    }

    collector.process_pending();
    let summary = collector.summary();
    log::info!(
        "diagnostics: {} lifecycle, {} warnings, {} errors",
        summary.lifecycle,
        summary.warnings,
        summary.errors
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(Some(args)) if !args.titles.is_empty() => args,
        Ok(_) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
