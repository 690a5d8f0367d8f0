//! Binary-coded decimal emission.

use arrayvec::ArrayVec;

use crate::symbol::Symbol;

/// Standard 4-bit BCD digit, least significant bit first.
pub const BCD_4: &[u16] = &[1, 2, 4, 8];
/// 3-bit tens digit (minutes).
pub const BCD_3: &[u16] = &[1, 2, 4];
/// 2-bit tens/hundreds digit (hours, day-of-year hundreds).
pub const BCD_2: &[u16] = &[1, 2];

/// Append one symbol per weight: `One` if `value & weight != 0`, else `Zero`.
///
/// Panics if `slots` has fewer free entries than `weights.len()`.
pub fn push_bcd<const N: usize>(slots: &mut ArrayVec<Symbol, N>, value: u16, weights: &[u16]) {
    for &weight in weights {
        slots.push(if value & weight != 0 { Symbol::One } else { Symbol::Zero });
    }
}
