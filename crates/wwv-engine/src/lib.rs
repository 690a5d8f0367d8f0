//! Playback engine for the WWV time code simulator.
//!
//! Advances the transport one output sample at a time, re-encodes the
//! time code frame on every minute tick and mixes the symbol sounds.

mod carrier;
mod event_queue;
mod frame;
mod minute_loop;
mod mixer;
pub mod scheduler;
mod sound_bank;
mod transport;
mod voice;

pub use carrier::{Carrier, DEFAULT_CARRIER_HZ};
pub use event_queue::EventQueue;
pub use frame::Frame;
pub use minute_loop::{
    nearest_minute, offset_to_next_minute, AnchoredClock, MinuteLoop, SystemClock, UtcClock, MINUTE,
};
pub use mixer::{Engine, EngineConfig, RenderMode};
pub use scheduler::{schedule_frame, EnvelopeShape, PulseEnvelope, SampleTrigger, SymbolRenderer};
pub use sound_bank::{tone_burst, SoundBank};
pub use transport::{Transport, TransportState};
pub use voice::{rate_to_increment, Voice};
