//! Core types for wwv-sim.
//!
//! This crate defines the time code frame, the encoder that builds it from
//! a UTC instant, and the event/time types the playback engine consumes.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bcd;
mod calendar;
mod encoder;
mod event;
mod sample;
mod symbol;
mod time_frame;
mod transport_time;

pub use bcd::{push_bcd, BCD_2, BCD_3, BCD_4};
pub use calendar::{day_of_year, day_of_year_utc};
pub use encoder::{encode_frame, TimeFields};
pub use event::{Event, EventPayload, EventTarget};
pub use sample::{Sample, SampleData};
pub use symbol::{SoundId, Symbol};
pub use time_frame::{TimeFrame, MARKER_SLOTS, SLOTS_PER_MINUTE};
pub use transport_time::{TransportTime, SUB_SECOND_UNIT};
