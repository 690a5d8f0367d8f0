//! Time code symbols and the sounds that carry them.

/// One second of the WWV time code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Top-of-minute reference; carries no coded bit.
    Unmarked,
    /// Binary zero (short pulse).
    #[default]
    Zero,
    /// Binary one (medium pulse).
    One,
    /// Position marker (long pulse).
    Marker,
}

impl Symbol {
    /// The sound used to render this symbol, or `None` for `Unmarked`.
    pub const fn sound(self) -> Option<SoundId> {
        match self {
            Symbol::Unmarked => None,
            Symbol::Zero => Some(SoundId::Zero),
            Symbol::One => Some(SoundId::One),
            Symbol::Marker => Some(SoundId::Marker),
        }
    }

    /// Single-character form used by `TimeFrame`'s `Display`.
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Unmarked => '-',
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Marker => 'M',
        }
    }

    /// True for the symbols that produce a pulse.
    pub const fn is_coded(self) -> bool {
        !matches!(self, Symbol::Unmarked)
    }
}

/// Named sound for each coded symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Zero,
    One,
    Marker,
}

impl SoundId {
    /// All sounds, in index order.
    pub const ALL: [SoundId; 3] = [SoundId::Zero, SoundId::One, SoundId::Marker];

    /// Dense index for per-sound tables.
    pub const fn index(self) -> usize {
        match self {
            SoundId::Zero => 0,
            SoundId::One => 1,
            SoundId::Marker => 2,
        }
    }

    /// Asset name, as used in `digital_<name>.wav`.
    pub const fn name(self) -> &'static str {
        match self {
            SoundId::Zero => "zero",
            SoundId::One => "one",
            SoundId::Marker => "marker",
        }
    }
}
