use core::fmt;

use fixed::types::{I16F16, I32F32};

/* Temperatures travel as a 12-bit magnitude with a sign flag in bit 11.
Bits 12-15 are not part of the encoding, but raw accessors hand them back
untouched. */
pub(crate) const SIGN_FLAG: i16 = 1 << 11;
pub(crate) const MAX_MAGNITUDE: i16 = SIGN_FLAG - 1;

/// Size of one LSB for a temperature register.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Resolution {
    /// 0.25 C per LSB. Pixel and interrupt level registers.
    Quarter,
    /// 0.0625 C per LSB. The on-board thermistor.
    Sixteenth,
}

impl Resolution {
    fn frac_bits(self) -> u32 {
        match self {
            Resolution::Quarter => 2,
            Resolution::Sixteenth => 4,
        }
    }

    /// Number of LSBs in one degree Celsius.
    pub fn steps_per_degree(self) -> f32 {
        (1u32 << self.frac_bits()) as f32
    }
}

/// A decoded temperature in degrees Celsius.
///
/// The value is stored as a 16.16 fixed point number, which represents every
/// register value at either resolution exactly.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Default, Clone, Copy)]
pub struct Temperature(pub(crate) I16F16);

impl Temperature {
    pub const ZERO: Temperature = Temperature(I16F16::ZERO);

    /// Decode a raw register pair read at the given resolution.
    pub fn from_raw(raw: i16, res: Resolution) -> Self {
        let bits = i32::from(magnitude(raw)) << (16 - res.frac_bits());
        Temperature(I16F16::from_bits(bits))
    }

    pub fn celsius(self) -> f32 {
        self.0.to_num()
    }

    pub fn fahrenheit(self) -> f32 {
        celsius_to_fahrenheit(self.celsius())
    }
}

impl From<Temperature> for I16F16 {
    fn from(temp: Temperature) -> Self {
        temp.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returned when a temperature cannot be represented by a 12-bit register.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OutOfRange;

/// Apply the bit 11 sign flag to a raw register value.
///
/// When the flag is set it is cleared and whatever remains is negated.
/// Nothing else is masked off.
pub fn magnitude(raw: i16) -> i16 {
    if raw & SIGN_FLAG != 0 {
        (raw & !SIGN_FLAG).wrapping_neg()
    } else {
        raw
    }
}

/// Encode degrees Celsius into the raw register value for `res`.
///
/// The magnitude is rounded to the nearest LSB with ties away from zero. A
/// negative value that rounds to zero is encoded as plain zero.
pub fn encode(celsius: f32, res: Resolution) -> Result<i16, OutOfRange> {
    let negative = celsius < 0.0;

    // I32F32 holds the scaled f32 exactly, so rounding happens only once.
    let steps = I32F32::checked_from_num(celsius * res.steps_per_degree())
        .and_then(|s| s.checked_abs())
        .and_then(|s| s.checked_round())
        .ok_or(OutOfRange)?;

    let mag: i16 = steps.checked_to_num().ok_or(OutOfRange)?;
    if mag > MAX_MAGNITUDE {
        return Err(OutOfRange);
    }

    if negative && mag != 0 {
        Ok(mag | SIGN_FLAG)
    } else {
        Ok(mag)
    }
}

/// Encode degrees Celsius into the `[lsb, msb]` register pair.
pub fn encode_bytes(celsius: f32, res: Resolution) -> Result<[u8; 2], OutOfRange> {
    encode(celsius, res).map(i16::to_le_bytes)
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) / 1.8
}
