pub(crate) const DEFAULT_ADDR: u8 = 0x69;
pub(crate) const ALTERNATE_ADDR: u8 = 0x68;

pub(crate) const POWER_CONTROL: u8 = 0x00;
pub(crate) const RESET: u8 = 0x01;
pub(crate) const FRAMERATE: u8 = 0x02;
pub(crate) const INT_CONTROL: u8 = 0x03;
pub(crate) const STATUS: u8 = 0x04;
pub(crate) const STATUS_CLEAR: u8 = 0x05;
pub(crate) const AVERAGE: u8 = 0x07;

pub(crate) const INT_LEVEL_UPPER: u8 = 0x08;
pub(crate) const INT_LEVEL_LOWER: u8 = 0x0A;
pub(crate) const INT_LEVEL_HYST: u8 = 0x0C;

pub(crate) const THERMISTOR: u8 = 0x0E;

pub(crate) const INT_TABLE: u8 = 0x10;
pub(crate) const INT_TABLE_LEN: usize = 8;

// Undocumented. Writes here unlock the Average Register.
pub(crate) const RESERVED_AVERAGE: u8 = 0x1F;
pub(crate) const AVERAGE_UNLOCK: [u8; 3] = [0x50, 0x45, 0x57];

pub(crate) const PIXEL_START: u8 = 0x80;
pub(crate) const PIXEL_COUNT: usize = 64;
