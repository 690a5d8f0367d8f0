//! Time code frame encoder.
//!
//! The frame is described by `LAYOUT`, an ordered list of segments that
//! together cover all 60 seconds. Encoding is a single walk over that list,
//! so every slot is written exactly once and unassigned seconds fall into
//! explicit `Zero` runs rather than being patched afterwards.

use arrayvec::ArrayVec;
use time::{OffsetDateTime, UtcOffset};

use crate::bcd::{push_bcd, BCD_2, BCD_3, BCD_4};
use crate::calendar::day_of_year;
use crate::symbol::Symbol;
use crate::time_frame::{TimeFrame, SLOTS_PER_MINUTE};

/// The UTC fields a frame transmits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeFields {
    /// Year modulo 100 (0-99)
    pub year: u16,
    /// Minute of hour (0-59)
    pub minute: u16,
    /// Hour of day (0-23)
    pub hour: u16,
    /// Day of year (1-366)
    pub day_of_year: u16,
}

impl TimeFields {
    /// Extract the transmitted fields from an instant, on the UTC calendar.
    pub fn from_instant(instant: OffsetDateTime) -> Self {
        let utc = instant.to_offset(UtcOffset::UTC);
        Self {
            year: utc.year().rem_euclid(100) as u16,
            minute: utc.minute() as u16,
            hour: utc.hour() as u16,
            day_of_year: day_of_year(utc.date()),
        }
    }

    fn digit(&self, digit: Digit) -> u16 {
        match digit {
            Digit::YearUnits => self.year % 10,
            Digit::YearTens => self.year / 10,
            Digit::MinuteUnits => self.minute % 10,
            Digit::MinuteTens => self.minute / 10,
            Digit::HourUnits => self.hour % 10,
            Digit::HourTens => self.hour / 10,
            Digit::DayUnits => self.day_of_year % 10,
            Digit::DayTens => self.day_of_year / 10 % 10,
            Digit::DayHundreds => self.day_of_year / 100,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Digit {
    YearUnits,
    YearTens,
    MinuteUnits,
    MinuteTens,
    HourUnits,
    HourTens,
    DayUnits,
    DayTens,
    DayHundreds,
}

#[derive(Clone, Copy, Debug)]
enum Segment {
    /// Slot 0 reference.
    Unmarked,
    /// Position marker.
    Marker,
    /// Fixed one bit.
    One,
    /// Run of zero bits (spacers, control and reserved slots).
    Zero(usize),
    /// A BCD digit with the given weights.
    Bcd(Digit, &'static [u16]),
}

impl Segment {
    const fn width(self) -> usize {
        match self {
            Segment::Unmarked | Segment::Marker | Segment::One => 1,
            Segment::Zero(n) => n,
            Segment::Bcd(_, weights) => weights.len(),
        }
    }
}

const LAYOUT: [Segment; 26] = [
    Segment::Unmarked,                         // 0
    Segment::Zero(3),                          // 1-3 control
    Segment::Bcd(Digit::YearUnits, BCD_4),     // 4-7
    Segment::Zero(1),                          // 8
    Segment::Marker,                           // 9
    Segment::Bcd(Digit::MinuteUnits, BCD_4),   // 10-13
    Segment::Zero(1),                          // 14
    Segment::Bcd(Digit::MinuteTens, BCD_3),    // 15-17
    Segment::Zero(1),                          // 18
    Segment::Marker,                           // 19
    Segment::Bcd(Digit::HourUnits, BCD_4),     // 20-23
    Segment::Zero(1),                          // 24
    Segment::Bcd(Digit::HourTens, BCD_2),      // 25-26
    Segment::Zero(2),                          // 27-28
    Segment::Marker,                           // 29
    Segment::Bcd(Digit::DayUnits, BCD_4),      // 30-33
    Segment::Zero(1),                          // 34
    Segment::Bcd(Digit::DayTens, BCD_4),       // 35-38
    Segment::Marker,                           // 39
    Segment::Bcd(Digit::DayHundreds, BCD_2),   // 40-41
    Segment::Zero(7),                          // 42-48 reserved
    Segment::Marker,                           // 49
    Segment::One,                              // 50
    Segment::Bcd(Digit::YearTens, BCD_4),      // 51-54
    Segment::Zero(4),                          // 55-58 reserved
    Segment::Marker,                           // 59
];

const fn layout_width(layout: &[Segment]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < layout.len() {
        total += layout[i].width();
        i += 1;
    }
    total
}

const _: () = assert!(layout_width(&LAYOUT) == SLOTS_PER_MINUTE);

/// Encode the time code frame for `instant`.
///
/// Pure: the same instant always yields the same frame.
pub fn encode_frame(instant: OffsetDateTime) -> TimeFrame {
    encode_fields(&TimeFields::from_instant(instant))
}

fn encode_fields(fields: &TimeFields) -> TimeFrame {
    let mut slots = ArrayVec::<Symbol, SLOTS_PER_MINUTE>::new();
    for segment in LAYOUT {
        match segment {
            Segment::Unmarked => slots.push(Symbol::Unmarked),
            Segment::Marker => slots.push(Symbol::Marker),
            Segment::One => slots.push(Symbol::One),
            Segment::Zero(n) => {
                for _ in 0..n {
                    slots.push(Symbol::Zero);
                }
            }
            Segment::Bcd(digit, weights) => push_bcd(&mut slots, fields.digit(digit), weights),
        }
    }
    TimeFrame::from_slots(slots)
}
