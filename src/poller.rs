use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use embedded_hal::i2c::I2c;
use tracing::{debug, info};

use crate::publish::{Publisher, Throttle};
use crate::sensor::HeatSensor;

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timing knobs for the poll loop.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub interval: Duration,
    pub display_rate: Duration,
    pub settle: Duration,
}

pub struct Poller<T, W>
where
    T: I2c,
{
    sensor: HeatSensor<T>,
    sink: Publisher<W>,
    throttle: Throttle,
    timing: Timing,
}

impl<T, W> Poller<T, W>
where
    T: I2c,
    W: Write,
{
    pub fn new(sensor: HeatSensor<T>, sink: Publisher<W>, timing: Timing) -> Self {
        Poller {
            sensor,
            sink,
            throttle: Throttle::new(timing.display_rate),
            timing,
        }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        self.sink.publish("Started setup...")?;
        self.sink.publish(REPOSITORY)?;
        self.sink.publish(format_args!("version: {}", VERSION))?;

        let value = self.sensor.read_value();
        info!(value, "first reading");

        sleep(self.timing.settle);
        self.display()?;
        self.sink.publish("Finished setup...")
    }

    pub fn poll(&mut self) -> io::Result<()> {
        let value = self.sensor.read_value();
        debug!(value, "polled");
        self.display()
    }

    /// Poll forever, `interval` apart. Only returns if the sink fails.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.poll()?;
            sleep(self.timing.interval);
        }
    }

    fn display(&mut self) -> io::Result<()> {
        let value = match self.sensor.most_recent() {
            Some(v) => v,
            None => return Ok(()),
        };

        if self.throttle.ready(self.sink.elapsed()) {
            self.sink.publish(value)?;
        }

        Ok(())
    }

    #[cfg(test)]
    fn into_parts(self) -> (HeatSensor<T>, W) {
        (self.sensor, self.sink.into_inner())
    }
}
