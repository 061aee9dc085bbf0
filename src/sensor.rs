use embedded_hal::i2c::I2c;
use grideye::{GridEye, Temperature};
use tracing::{debug, warn};

/// Averages the whole frame into one Fahrenheit reading.
///
/// A pixel that cannot be read counts as 0 C, so an unplugged sensor reads
/// 32 F instead of stopping the poller.
pub struct HeatSensor<T>
where
    T: I2c,
{
    ge: GridEye<T>,
    most_recent: Option<i32>,
}

impl<T> HeatSensor<T>
where
    T: I2c,
{
    pub fn new(ge: GridEye<T>) -> Self {
        HeatSensor {
            ge,
            most_recent: None,
        }
    }

    pub fn most_recent(&self) -> Option<i32> {
        self.most_recent
    }

    /// Mean of the per-pixel Fahrenheit values, each truncated to a whole
    /// degree, with the mean truncated as well.
    pub fn read_value(&mut self) -> i32 {
        let mut total = 0i32;
        let mut failed = 0u32;

        for pixel in 0..grideye::PIXELS as u8 {
            let temp = match self.ge.pixel_temperature(pixel) {
                Ok(t) => t,
                Err(e) => {
                    debug!(pixel, error = %e, "pixel read failed");
                    failed += 1;
                    Temperature::ZERO
                }
            };

            total += temp.fahrenheit() as i32;
        }

        if failed > 0 {
            warn!(failed, "pixel reads failed, counted as 0 C");
        }

        let value = total / grideye::PIXELS as i32;
        self.most_recent = Some(value);
        value
    }

    #[cfg(test)]
    pub(crate) fn free(self) -> T {
        self.ge.free()
    }
}
