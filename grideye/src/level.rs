use crate::reg;

/// One of the three interrupt level register pairs.
///
/// Each level is a 12-bit value at 0.25 C per LSB, stored LSB first at
/// consecutive addresses.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Level {
    Upper,
    Lower,
    Hysteresis,
}

impl Level {
    pub(crate) fn lsb(self) -> u8 {
        match self {
            Level::Upper => reg::INT_LEVEL_UPPER,
            Level::Lower => reg::INT_LEVEL_LOWER,
            Level::Hysteresis => reg::INT_LEVEL_HYST,
        }
    }

    pub(crate) fn msb(self) -> u8 {
        self.lsb() + 1
    }
}
