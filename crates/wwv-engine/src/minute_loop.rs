//! Minute loop driver: re-encode and reschedule on every 60 s tick.

use time::{Duration, OffsetDateTime};
use tracing::debug;
use wwv_ir::{encode_frame, Event, TimeFrame, TransportTime, SUB_SECOND_UNIT};

use crate::scheduler::{schedule_frame, SymbolRenderer};
use crate::transport::Transport;

/// Interval of the repeating tick.
pub const MINUTE: TransportTime = TransportTime::from_seconds(60);

/// Source of the UTC instant encoded at each tick.
pub trait UtcClock: Send {
    /// The UTC instant corresponding to transport time `at`.
    fn now_utc(&self, at: TransportTime) -> OffsetDateTime;
}

/// Wall clock. Ignores transport time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl UtcClock for SystemClock {
    fn now_utc(&self, _at: TransportTime) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Fixed instant at transport zero; time advances with the transport.
/// Used for offline rendering and tests.
#[derive(Clone, Copy, Debug)]
pub struct AnchoredClock {
    anchor: OffsetDateTime,
}

impl AnchoredClock {
    pub fn new(anchor: OffsetDateTime) -> Self {
        Self { anchor }
    }
}

impl UtcClock for AnchoredClock {
    fn now_utc(&self, at: TransportTime) -> OffsetDateTime {
        self.anchor + transport_duration(at)
    }
}

/// Drives one renderer from the repeating minute tick.
pub struct MinuteLoop {
    renderer: Box<dyn SymbolRenderer>,
    clock: Box<dyn UtcClock>,
    snap_to_minute: bool,
    /// Reused event buffer, sized for the envelope variant
    scratch: Vec<Event>,
    last_frame: Option<TimeFrame>,
}

impl MinuteLoop {
    pub fn new(renderer: Box<dyn SymbolRenderer>, clock: Box<dyn UtcClock>) -> Self {
        Self {
            renderer,
            clock,
            snap_to_minute: false,
            scratch: Vec::with_capacity(256),
            last_frame: None,
        }
    }

    /// Round each tick's instant to the nearest whole minute.
    pub fn with_snap_to_minute(mut self, snap: bool) -> Self {
        self.snap_to_minute = snap;
        self
    }

    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }

    /// The clock's instant for transport time `at`.
    pub fn now_utc(&self, at: TransportTime) -> OffsetDateTime {
        self.clock.now_utc(at)
    }

    /// The frame scheduled by the most recent tick.
    pub fn last_frame(&self) -> Option<&TimeFrame> {
        self.last_frame.as_ref()
    }

    /// Encode the frame for the tick at `tick` and queue its events with
    /// slot 0 at `tick`. Returns the number of events scheduled.
    pub fn on_tick(&mut self, tick: TransportTime, transport: &mut Transport) -> usize {
        let mut instant = self.clock.now_utc(tick);
        if self.snap_to_minute {
            instant = nearest_minute(instant);
        }

        let frame = encode_frame(instant);
        self.scratch.clear();
        schedule_frame(&frame, tick, self.renderer.as_ref(), &mut self.scratch);
        transport.schedule_all(&self.scratch);

        debug!(
            renderer = self.renderer.name(),
            tick = tick.as_secs_f64(),
            %instant,
            %frame,
            events = self.scratch.len(),
            "scheduled minute frame"
        );
        self.last_frame = Some(frame);
        self.scratch.len()
    }
}

/// Round `instant` to the nearest whole minute.
pub fn nearest_minute(instant: OffsetDateTime) -> OffsetDateTime {
    let shifted = instant + Duration::seconds(30);
    shifted
        - Duration::seconds(shifted.second() as i64)
        - Duration::nanoseconds(shifted.nanosecond() as i64)
}

/// Start offset that puts transport zero on the next UTC minute boundary,
/// at least `min_offset` ahead of `now`.
pub fn offset_to_next_minute(now: OffsetDateTime, min_offset: TransportTime) -> TransportTime {
    let into_minute = Duration::seconds(now.second() as i64) + Duration::nanoseconds(now.nanosecond() as i64);
    let mut remaining = Duration::MINUTE - into_minute;
    if remaining < transport_duration(min_offset) {
        remaining += Duration::MINUTE;
    }
    TransportTime::from_millis(remaining.whole_milliseconds().max(0) as u64)
}

fn transport_duration(at: TransportTime) -> Duration {
    let nanos = at.sub_second as u64 * 1_000_000_000 / SUB_SECOND_UNIT as u64;
    Duration::new(at.second as i64, nanos as i32)
}
