//! One minute of encoded time code.

use arrayvec::ArrayVec;
use core::fmt;

use crate::symbol::Symbol;

/// Number of one-second slots in a frame.
pub const SLOTS_PER_MINUTE: usize = 60;

/// Slots that always carry a position marker.
pub const MARKER_SLOTS: [usize; 6] = [9, 19, 29, 39, 49, 59];

/// A complete 60-slot time code frame.
///
/// Only the encoder builds frames, and it always fills all 60 slots, so
/// every index in `0..SLOTS_PER_MINUTE` is valid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeFrame {
    slots: ArrayVec<Symbol, SLOTS_PER_MINUTE>,
}

impl TimeFrame {
    /// Wrap a fully populated slot list.
    pub(crate) fn from_slots(slots: ArrayVec<Symbol, SLOTS_PER_MINUTE>) -> Self {
        debug_assert!(slots.is_full());
        Self { slots }
    }

    /// Symbol at `second` (0-59).
    pub fn slot(&self, second: usize) -> Symbol {
        self.slots[second]
    }

    /// All slots in second order.
    pub fn slots(&self) -> &[Symbol] {
        &self.slots
    }

    /// `(second, symbol)` pairs in second order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.slots.iter().copied().enumerate()
    }

    /// Number of slots that produce a pulse (everything except slot 0).
    pub fn coded_len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_coded()).count()
    }
}

impl fmt::Display for TimeFrame {
    /// 60 characters: `-` unmarked, `0`, `1`, `M` marker.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.slots {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}
