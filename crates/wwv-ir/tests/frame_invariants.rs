//! Frame invariants across a sweep of UTC instants.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use wwv_ir::{encode_frame, Symbol, TimeFields, MARKER_SLOTS, SLOTS_PER_MINUTE};

/// Every 7h13m from 2019 through 2025, hitting all hours, most minutes,
/// and both leap and common years.
fn sweep() -> impl Iterator<Item = OffsetDateTime> {
    let start = datetime!(2019-01-01 00:00 UTC);
    let end = datetime!(2026-01-01 00:00 UTC);
    let step = Duration::minutes(7 * 60 + 13);
    (0i32..).map(move |i| start + step * i).take_while(move |t| *t < end)
}

/// Read back a BCD digit from the frame (test-only helper).
fn digit(frame: &wwv_ir::TimeFrame, first: usize, weights: &[u16]) -> u16 {
    weights
        .iter()
        .enumerate()
        .filter(|(i, _)| frame.slot(first + i) == Symbol::One)
        .map(|(_, w)| *w)
        .sum()
}

#[test]
fn structural_invariants_hold_everywhere() {
    for at in sweep() {
        let frame = encode_frame(at);
        assert_eq!(frame.slots().len(), SLOTS_PER_MINUTE);
        assert_eq!(frame.slot(0), Symbol::Unmarked, "{}", at);
        assert_eq!(frame.slot(50), Symbol::One, "{}", at);

        for (s, symbol) in frame.iter() {
            if MARKER_SLOTS.contains(&s) {
                assert_eq!(symbol, Symbol::Marker, "slot {} at {}", s, at);
            } else if s != 0 {
                assert!(
                    matches!(symbol, Symbol::Zero | Symbol::One),
                    "slot {} at {} is {:?}",
                    s,
                    at,
                    symbol
                );
            }
        }
        assert_eq!(frame.coded_len(), 59);
    }
}

#[test]
fn encoded_digits_match_fields() {
    for at in sweep() {
        let frame = encode_frame(at);
        let fields = TimeFields::from_instant(at);

        let minute = digit(&frame, 10, &[1, 2, 4, 8]) + 10 * digit(&frame, 15, &[1, 2, 4]);
        let hour = digit(&frame, 20, &[1, 2, 4, 8]) + 10 * digit(&frame, 25, &[1, 2]);
        let day = digit(&frame, 30, &[1, 2, 4, 8])
            + 10 * digit(&frame, 35, &[1, 2, 4, 8])
            + 100 * digit(&frame, 40, &[1, 2]);
        let year = digit(&frame, 4, &[1, 2, 4, 8]) + 10 * digit(&frame, 51, &[1, 2, 4, 8]);

        assert_eq!(minute, fields.minute, "{}", at);
        assert_eq!(hour, fields.hour, "{}", at);
        assert_eq!(day, fields.day_of_year, "{}", at);
        assert_eq!(year, fields.year, "{}", at);
    }
}

#[test]
fn day_366_uses_hundreds_and_tens() {
    let frame = encode_frame(datetime!(2024-12-31 23:59 UTC));
    assert_eq!(digit(&frame, 40, &[1, 2]), 3);
    assert_eq!(digit(&frame, 35, &[1, 2, 4, 8]), 6);
    assert_eq!(digit(&frame, 30, &[1, 2, 4, 8]), 6);
}
