//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use wwv_master::Mode;

/// Playback variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Retrigger a recorded sound per symbol
    Trigger,
    /// Gate a 100 Hz sub-carrier with pulse envelopes
    Envelope,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Trigger => Mode::Trigger,
            ModeArg::Envelope => Mode::Envelope,
        }
    }
}

/// wwv-sim: WWV time code simulator
#[derive(Parser, Debug)]
#[command(name = "wwv-sim")]
#[command(about = "Encodes UTC into the WWV time code and plays it in real time")]
#[command(version)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive playback: Enter toggles start/stop, q quits
    Play {
        #[command(flatten)]
        session: SessionArgs,

        /// Discard audio instead of opening the output device
        #[arg(long)]
        null_output: bool,
    },
    /// Render to a WAV file
    Render {
        #[command(flatten)]
        session: SessionArgs,

        /// Output WAV file path
        #[arg(short, long)]
        wav: PathBuf,

        /// Length in seconds
        #[arg(short, long, default_value_t = 60)]
        seconds: u32,

        /// Instant of the first slot 0 (RFC 3339); defaults to the current minute
        #[arg(long, value_parser = parse_instant)]
        at: Option<OffsetDateTime>,

        /// Output sample rate
        #[arg(long)]
        sample_rate: Option<u32>,
    },
    /// Print the 60-slot frame for an instant
    Frame {
        /// Instant to encode (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<OffsetDateTime>,
    },
}

/// Overrides for config file values.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Directory holding digital_{zero,one,marker}.wav
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Start slot 0 on the next UTC minute boundary
    #[arg(long)]
    pub align: bool,

    /// Forward start offset in milliseconds
    #[arg(long)]
    pub start_offset_ms: Option<u64>,
}

fn parse_instant(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| format!("expected RFC 3339 instant: {e}"))
}
