//! wwv-sim: plays or renders the WWV time code for the current UTC minute.
//!
//! Usage:
//!   wwv-sim play [--mode envelope] [--assets dir]
//!   wwv-sim render --wav out.wav --seconds 120 --at 2024-01-01T00:00:00Z
//!   wwv-sim frame --at 2023-06-15T14:22:00Z

mod cli;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;
use wwv_master::{encode_frame, Config, Controller, OutputKind};

use cli::{Cli, Command, SessionArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    tracing::debug!(?config, "configuration");

    match cli.command {
        Command::Play { session, null_output } => {
            let config = apply_overrides(config, &session)?;
            let output = if null_output { OutputKind::Null } else { OutputKind::Device };
            play(Controller::new(config, output))
        }
        Command::Render {
            session,
            wav,
            seconds,
            at,
            sample_rate,
        } => {
            let mut config = apply_overrides(config, &session)?;
            if let Some(rate) = sample_rate {
                config.sample_rate = rate;
            }
            config.validate()?;
            let start = at.unwrap_or_else(current_minute);
            let controller = Controller::new(config, OutputKind::Null);
            let rate = controller.config().sample_rate;

            println!("Rendering {seconds} s from {start} at {rate} Hz to {}", wav.display());
            controller
                .render_to_wav_file(&wav, start, rate, seconds)
                .with_context(|| format!("rendering {}", wav.display()))?;
            println!("Done.");
            Ok(())
        }
        Command::Frame { at } => {
            let instant = at.unwrap_or_else(OffsetDateTime::now_utc);
            println!("{}", instant.to_offset(time::UtcOffset::UTC));
            println!("{}", encode_frame(instant));
            Ok(())
        }
    }
}

fn apply_overrides(mut config: Config, args: &SessionArgs) -> Result<Config> {
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(dir) = &args.assets {
        config.asset_dir = Some(dir.clone());
    }
    if args.align {
        config.align_to_minute = true;
    }
    if let Some(ms) = args.start_offset_ms {
        config.start_offset_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

/// The current UTC time truncated to the minute.
fn current_minute() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - time::Duration::seconds(now.second() as i64) - time::Duration::nanoseconds(now.nanosecond() as i64)
}

fn play(mut controller: Controller) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("[{}] Enter to toggle, q to quit: ", controller.label());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "q" | "quit" => break,
            _ => {
                controller.toggle();
            }
        }
    }

    controller.stop();
    println!();
    Ok(())
}
