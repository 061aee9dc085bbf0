use modular_bitfield::prelude::*;

/// Interrupt Control Register (0x03).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptControl {
    /// Drive the INT pin low while an interrupt is pending. Hi-Z otherwise.
    pub(crate) pin_enabled: bool,
    pub(crate) mode: InterruptMode,
    #[skip]
    __: B6,
}

#[derive(BitfieldSpecifier, Debug, Clone, Copy, PartialEq, Eq)]
#[bits = 1]
pub enum InterruptMode {
    /// Compare each pixel against the change since the previous frame.
    Difference = 0,
    /// Compare each pixel against the interrupt levels.
    Absolute = 1,
}

/// Status Register (0x04). Read only.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    #[skip]
    __: B1,
    pub(crate) interrupt: bool,
    pixel_overflow: bool,
    thermistor_overflow: bool,
    #[skip]
    __: B4,
}

impl Status {
    pub fn pixel_output_ok(&self) -> bool {
        !self.pixel_overflow()
    }

    pub fn device_output_ok(&self) -> bool {
        !self.thermistor_overflow()
    }
}

/// Average Register (0x07).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Average {
    #[skip]
    __: B5,
    pub(crate) moving_average: bool,
    #[skip]
    __: B2,
}

/* Whole-byte registers that only accept a handful of values. Each becomes a
repr(u8) enum that converts into the byte written to the device. */
macro_rules! impl_value {
    (
        $(#[$meta:meta])*
        $type:ident { $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $type {
            $(
                $(#[$vmeta])*
                $variant = $val
            ),+
        }

        impl From<$type> for u8 {
            fn from(val: $type) -> u8 {
                val as u8
            }
        }
    }
}

impl_value!(
    /// Power Control Register (0x00).
    PowerMode {
        Normal = 0x00,
        /// Temperature registers stop updating.
        Sleep = 0x10,
        /// Update once every 60 seconds.
        Standby60s = 0x20,
        /// Update once every 10 seconds.
        Standby10s = 0x21,
    }
);

impl_value!(
    /// Reset Register (0x01).
    Reset {
        /// Clear the status register, interrupt flag and interrupt table.
        Flag = 0x30,
        /// Flag reset plus reloading adjustment values from non-volatile memory.
        Initial = 0x3F,
    }
);

impl_value!(
    /// Frame Rate Register (0x02).
    ///
    /// The device always samples at 10 FPS internally. In 1 FPS mode each
    /// frame is the average of ten samples.
    Framerate {
        Fps10 = 0,
        Fps1 = 1,
    }
);

impl_value!(
    /// Status Clear Register (0x05). Write only.
    Clear {
        Interrupt = 0x02,
        PixelOverflow = 0x04,
        DeviceOverflow = 0x08,
        AllOverflow = 0x0C,
        All = 0x0E,
    }
);

impl Framerate {
    pub(crate) fn from_reg(val: u8) -> Self {
        if val & 0x01 == 0 {
            Framerate::Fps10
        } else {
            Framerate::Fps1
        }
    }
}

/// Location of a pixel's flag in the Interrupt Table Registers.
///
/// Returns the register address and the bit within it. `pixel` must already
/// be checked to be below 64.
pub(crate) fn interrupt_table_position(pixel: u8) -> (u8, u8) {
    (crate::reg::INT_TABLE + pixel / 8, pixel % 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_control_bits() {
        let icr = InterruptControl::new()
            .with_pin_enabled(true)
            .with_mode(InterruptMode::Absolute);
        assert_eq!(icr.into_bytes(), [0b11]);

        let icr = InterruptControl::from_bytes([0b1111_1101]);
        assert!(icr.pin_enabled());
        assert_eq!(icr.mode(), InterruptMode::Difference);
    }

    #[test]
    fn status_bits() {
        let status = Status::from_bytes([0b0000_0010]);
        assert!(status.interrupt());
        assert!(status.pixel_output_ok());
        assert!(status.device_output_ok());

        let status = Status::from_bytes([0b0000_1100]);
        assert!(!status.interrupt());
        assert!(!status.pixel_output_ok());
        assert!(!status.device_output_ok());
    }

    #[test]
    fn average_bit() {
        assert!(Average::from_bytes([0x20]).moving_average());
        assert!(!Average::from_bytes([0xDF]).moving_average());
    }

    #[test]
    fn clear_values() {
        assert_eq!(
            u8::from(Clear::AllOverflow),
            u8::from(Clear::PixelOverflow) | u8::from(Clear::DeviceOverflow)
        );
        assert_eq!(
            u8::from(Clear::All),
            u8::from(Clear::AllOverflow) | u8::from(Clear::Interrupt)
        );
    }

    #[test]
    fn interrupt_table_corners() {
        assert_eq!(interrupt_table_position(0), (0x10, 0));
        assert_eq!(interrupt_table_position(9), (0x11, 1));
        assert_eq!(interrupt_table_position(63), (0x17, 7));
    }

    #[test]
    fn framerate_from_reg() {
        assert_eq!(Framerate::from_reg(0), Framerate::Fps10);
        assert_eq!(Framerate::from_reg(1), Framerate::Fps1);
    }
}
