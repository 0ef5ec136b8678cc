//! Terminal rendition of the gold position screen.

mod cli;
mod render;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use gold_position_core::{GoldPositionTracker, LoadPhase, Tab};

use crate::cli::Cli;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .init();

    let cli = Cli::parse();
    log::info!("Starting gold-position v{}", env!("CARGO_PKG_VERSION"));

    let query = cli.launch_query()?;
    let mut tracker = match GoldPositionTracker::from_query(&query, &cli.settings()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", render::error_screen(&e.to_string()));
            std::process::exit(2);
        }
    };
    tracker.set_active_tab(cli.tab.parse::<Tab>()?);

    println!("Loading...");
    // The result is mirrored in the phase; the message lives there.
    let _ = tracker.load().await;
    match tracker.phase() {
        LoadPhase::Ready => {}
        LoadPhase::Failed(msg) => {
            eprintln!("{}", render::error_screen(msg));
            std::process::exit(1);
        }
        other => anyhow::bail!("load ended in unexpected state {other:?}"),
    }

    let snapshot = tracker.snapshot();
    if !snapshot.is_valid() {
        eprintln!(
            "{}",
            render::error_screen("position parameters produce an invalid valuation")
        );
        std::process::exit(2);
    }

    print!("{}", render::header(&tracker));
    if cli.no_animate {
        println!("{}", render::counter_line(snapshot.profit_loss_local, snapshot.profit_loss_percent));
    } else {
        play_counter(&mut tracker).await?;
    }
    print!("{}", render::panel(&tracker));

    let series = tracker.performance_series();
    print!("{}", render::chart_caption(&series));

    if let Some(path) = &cli.svg {
        std::fs::write(path, render::chart_svg(&series, tracker.theme(), snapshot.is_profit()))
            .with_context(|| format!("writing chart to {}", path.display()))?;
        println!("Chart written to {}", path.display());
    }

    Ok(())
}

async fn play_counter(tracker: &mut GoldPositionTracker) -> Result<()> {
    let mut rx = tracker.start_counter();
    let mut stdout = std::io::stdout();
    while rx.changed().await.is_ok() {
        let frame = *rx.borrow_and_update();
        write!(
            stdout,
            "\r{}",
            render::counter_line(frame.profit_loss_local, frame.profit_loss_percent)
        )?;
        stdout.flush()?;
        if frame.frame >= gold_position_core::animation::COUNTER_FRAMES {
            break;
        }
    }
    writeln!(stdout)?;
    tracker.stop_counter();
    Ok(())
}
