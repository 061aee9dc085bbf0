/*! `grideye` is an [`embedded_hal`](https://github.com/rust-embedded/embedded-hal) crate for
accessing Panasonic GridEYE (AMG88xx) 8x8 infrared array sensors over an I2C bus.

The GridEYE exposes a flat map of byte-wide registers. Single bytes hold configuration and
status; byte pairs (LSB first) hold temperatures:

* 64 pixel temperatures and three interrupt levels, 0.25 C per LSB
* the on-board thermistor, 0.0625 C per LSB

Temperatures are a 12-bit magnitude with a sign flag in bit 11. [`Temperature`] decodes them,
and [`temp::encode`] goes the other way for the writable interrupt levels.

Every register access is a single bus transaction: a register write is `[reg, value]`, a read
writes the register address and reads the value back after a repeated start. Nothing is
cached, so the [GridEye] struct works on multi-controller buses as well. */
#![no_std]

use core::fmt;
use core::result::Result;
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, SevenBitAddress};

mod config;
pub use config::*;

mod level;
pub use level::Level;

mod reg;

pub mod temp;
pub use temp::{Resolution, Temperature};

/// Number of pixels in a frame.
pub const PIXELS: usize = reg::PIXEL_COUNT;

/** A struct for describing how to read and write a GridEYE's registers via an
[`embedded_hal`] I2C implementation.

The only state kept is the device address. */
pub struct GridEye<T>
where
    T: I2c<SevenBitAddress>,
{
    ctx: T,
    address: u8,
}

#[derive(Debug, PartialEq)]
/// Enum for describing possible error conditions when reading/writing a GridEYE.
pub enum Error<E> {
    /** Nothing acknowledged the device address. Usually the sensor is absent, unpowered, or
    at the other address. */
    Unresponsive(E),
    /** Reading the desired register via `embedded_hal` failed. Short transfers also end up
    here, since [`I2c`] transfers either fill the buffer or fail. */
    ReadError(E),
    /** Writing the desired register via `embedded_hal` failed. */
    WriteError(E),
    /** A temperature does not fit in a 12-bit interrupt level register. */
    OutOfRange,
    /** Pixel index was not below 64. */
    InvalidPixel(u8),
}

impl<E> Error<E>
where
    E: i2c::Error,
{
    fn read(err: E) -> Self {
        if Self::unacknowledged(&err) {
            Error::Unresponsive(err)
        } else {
            Error::ReadError(err)
        }
    }

    fn write(err: E) -> Self {
        if Self::unacknowledged(&err) {
            Error::Unresponsive(err)
        } else {
            Error::WriteError(err)
        }
    }

    fn unacknowledged(err: &E) -> bool {
        matches!(
            err.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown)
        )
    }
}

impl<E> From<temp::OutOfRange> for Error<E> {
    fn from(_: temp::OutOfRange) -> Self {
        Error::OutOfRange
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unresponsive(e) => write!(f, "device did not respond: {:?}", e),
            Error::ReadError(e) => write!(f, "register read failed: {:?}", e),
            Error::WriteError(e) => write!(f, "register write failed: {:?}", e),
            Error::OutOfRange => write!(f, "temperature out of range for a 12-bit register"),
            Error::InvalidPixel(p) => write!(f, "pixel {} out of range (expected 0-63)", p),
        }
    }
}

impl<E> core::error::Error for Error<E> where E: fmt::Debug {}

type GridEyeResult<V, T> = Result<V, Error<<T as i2c::ErrorType>::Error>>;

impl<T> GridEye<T>
where
    T: I2c<SevenBitAddress>,
{
    /// Talk to a sensor at the default address, 0x69.
    pub fn new(ctx: T) -> Self {
        GridEye {
            ctx,
            address: reg::DEFAULT_ADDR,
        }
    }

    /// Use the alternate address, 0x68 (AD_SELECT pulled low).
    pub fn with_alternate_addr(mut self) -> Self {
        self.address = reg::ALTERNATE_ADDR;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Write one byte to `reg`.
    pub fn set_register(&mut self, reg: u8, val: u8) -> GridEyeResult<(), T> {
        self.ctx
            .write(self.address, &[reg, val])
            .map_err(Error::write)
    }

    /// Read one byte from `reg`.
    pub fn register(&mut self, reg: u8) -> GridEyeResult<u8, T> {
        let mut buf = [0u8; 1];
        self.read_into(reg, &mut buf)?;
        Ok(buf[0])
    }

    /// Read `reg` (LSB) and `reg + 1` (MSB) as one signed value.
    pub fn register_pair(&mut self, reg: u8) -> GridEyeResult<i16, T> {
        let mut buf = [0u8; 2];
        self.read_into(reg, &mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    fn read_into(&mut self, reg: u8, buf: &mut [u8]) -> GridEyeResult<(), T> {
        self.ctx
            .write_read(self.address, &[reg], buf)
            .map_err(Error::read)
    }

    fn check_pixel(pixel: u8) -> GridEyeResult<(), T> {
        if usize::from(pixel) >= PIXELS {
            return Err(Error::InvalidPixel(pixel));
        }

        Ok(())
    }

    fn pixel_reg(pixel: u8) -> GridEyeResult<u8, T> {
        Self::check_pixel(pixel)?;
        Ok(reg::PIXEL_START + 2 * pixel)
    }

    pub fn pixel_temperature(&mut self, pixel: u8) -> GridEyeResult<Temperature, T> {
        let raw = self.pixel_temperature_raw(pixel)?;
        Ok(Temperature::from_raw(raw, Resolution::Quarter))
    }

    /// Contents of the pixel's register pair, without any sign handling.
    pub fn pixel_temperature_raw(&mut self, pixel: u8) -> GridEyeResult<i16, T> {
        let reg = Self::pixel_reg(pixel)?;
        self.register_pair(reg)
    }

    /// All 64 pixel register pairs in one transfer, in row-major order.
    pub fn frame_raw(&mut self) -> GridEyeResult<[i16; PIXELS], T> {
        let mut buf = [0u8; PIXELS * 2];
        self.read_into(reg::PIXEL_START, &mut buf)?;

        let mut frame = [0i16; PIXELS];
        for (px, bytes) in frame.iter_mut().zip(buf.chunks_exact(2)) {
            *px = i16::from_le_bytes([bytes[0], bytes[1]]);
        }

        Ok(frame)
    }

    pub fn frame(&mut self) -> GridEyeResult<[Temperature; PIXELS], T> {
        let raw = self.frame_raw()?;
        Ok(raw.map(|r| Temperature::from_raw(r, Resolution::Quarter)))
    }

    /// Temperature of the on-board thermistor.
    pub fn device_temperature(&mut self) -> GridEyeResult<Temperature, T> {
        let raw = self.device_temperature_raw()?;
        Ok(Temperature::from_raw(raw, Resolution::Sixteenth))
    }

    pub fn device_temperature_raw(&mut self) -> GridEyeResult<i16, T> {
        self.register_pair(reg::THERMISTOR)
    }

    pub fn set_power_mode(&mut self, mode: PowerMode) -> GridEyeResult<(), T> {
        self.set_register(reg::POWER_CONTROL, mode.into())
    }

    pub fn reset(&mut self, kind: Reset) -> GridEyeResult<(), T> {
        self.set_register(reg::RESET, kind.into())
    }

    pub fn framerate(&mut self) -> GridEyeResult<Framerate, T> {
        self.register(reg::FRAMERATE).map(Framerate::from_reg)
    }

    pub fn set_framerate(&mut self, rate: Framerate) -> GridEyeResult<(), T> {
        self.set_register(reg::FRAMERATE, rate.into())
    }

    pub fn interrupt_control(&mut self) -> GridEyeResult<InterruptControl, T> {
        let icr = self.register(reg::INT_CONTROL)?;
        Ok(InterruptControl::from_bytes([icr]))
    }

    pub fn set_interrupt_control(&mut self, icr: InterruptControl) -> GridEyeResult<(), T> {
        self.set_register(reg::INT_CONTROL, icr.into_bytes()[0])
    }

    /// Read-modify-write the Interrupt Control Register.
    pub fn update_interrupt_control<F>(&mut self, f: F) -> GridEyeResult<(), T>
    where
        F: FnOnce(InterruptControl) -> InterruptControl,
    {
        let icr = self.interrupt_control()?;
        self.set_interrupt_control(f(icr))
    }

    pub fn enable_interrupt_pin(&mut self) -> GridEyeResult<(), T> {
        self.update_interrupt_control(|icr| icr.with_pin_enabled(true))
    }

    /// Put the INT pin into Hi-Z.
    pub fn disable_interrupt_pin(&mut self) -> GridEyeResult<(), T> {
        self.update_interrupt_control(|icr| icr.with_pin_enabled(false))
    }

    pub fn interrupt_pin_enabled(&mut self) -> GridEyeResult<bool, T> {
        self.interrupt_control().map(|icr| icr.pin_enabled())
    }

    pub fn set_interrupt_mode(&mut self, mode: InterruptMode) -> GridEyeResult<(), T> {
        self.update_interrupt_control(|icr| icr.with_mode(mode))
    }

    pub fn status(&mut self) -> GridEyeResult<Status, T> {
        let stat = self.register(reg::STATUS)?;
        Ok(Status::from_bytes([stat]))
    }

    /// Clear status flags. Clearing a flag that is not set is harmless.
    pub fn clear_status(&mut self, flags: Clear) -> GridEyeResult<(), T> {
        self.set_register(reg::STATUS_CLEAR, flags.into())
    }

    /// Whether the pixel's bit is set in the Interrupt Table.
    pub fn pixel_interrupt(&mut self, pixel: u8) -> GridEyeResult<bool, T> {
        Self::check_pixel(pixel)?;

        let (reg, bit) = config::interrupt_table_position(pixel);
        let row = self.register(reg)?;
        Ok(row & (1 << bit) != 0)
    }

    /// The whole Interrupt Table; bit `n` is pixel `n`.
    pub fn interrupt_table(&mut self) -> GridEyeResult<u64, T> {
        let mut buf = [0u8; reg::INT_TABLE_LEN];
        self.read_into(reg::INT_TABLE, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /** Turn "twice moving average" output on or off.

    The Average Register is locked behind writes of an undocumented key to a reserved
    register, and is relocked afterwards. Not every revision of the datasheet mentions this,
    and it may have no visible effect.

    The relock write is attempted even if unlocking or the Average write failed; the first
    error is the one returned. */
    pub fn set_moving_average(&mut self, enable: bool) -> GridEyeResult<(), T> {
        let written = self.unlocked_average_write(enable);
        let relocked = self.set_register(reg::RESERVED_AVERAGE, 0x00);
        written.and(relocked)
    }

    fn unlocked_average_write(&mut self, enable: bool) -> GridEyeResult<(), T> {
        for key in reg::AVERAGE_UNLOCK {
            self.set_register(reg::RESERVED_AVERAGE, key)?;
        }

        let avg = Average::new().with_moving_average(enable);
        self.set_register(reg::AVERAGE, avg.into_bytes()[0])
    }

    pub fn moving_average_enabled(&mut self) -> GridEyeResult<bool, T> {
        let avg = self.register(reg::AVERAGE)?;
        Ok(Average::from_bytes([avg]).moving_average())
    }

    /// Set an interrupt level in degrees Celsius.
    pub fn set_level(&mut self, level: Level, celsius: f32) -> GridEyeResult<(), T> {
        let raw = temp::encode(celsius, Resolution::Quarter)?;
        self.set_level_raw(level, raw)
    }

    pub fn set_level_fahrenheit(&mut self, level: Level, fahrenheit: f32) -> GridEyeResult<(), T> {
        self.set_level(level, temp::fahrenheit_to_celsius(fahrenheit))
    }

    /// Write a level register pair as-is, LSB first.
    pub fn set_level_raw(&mut self, level: Level, raw: i16) -> GridEyeResult<(), T> {
        let [lsb, msb] = raw.to_le_bytes();
        self.set_register(level.lsb(), lsb)?;
        self.set_register(level.msb(), msb)
    }

    pub fn level(&mut self, level: Level) -> GridEyeResult<Temperature, T> {
        let raw = self.level_raw(level)?;
        Ok(Temperature::from_raw(raw, Resolution::Quarter))
    }

    pub fn level_raw(&mut self, level: Level) -> GridEyeResult<i16, T> {
        self.register_pair(level.lsb())
    }

    pub fn free(self) -> T {
        self.ctx
    }
}
