use std::io;
use std::time::Duration;

use argh::FromArgs;
use eyre::{Result, WrapErr};
use grideye::GridEye;
use linux_embedded_hal::I2cdev;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod poller;
mod publish;
mod sensor;

use poller::{Poller, Timing};
use publish::Publisher;
use sensor::HeatSensor;

#[derive(FromArgs)]
#[argh(description = "poll a GridEYE and publish the average frame temperature in Fahrenheit")]
struct InputArgs {
    #[argh(positional, default = "String::from(\"/dev/i2c-1\")")]
    bus: String,
    #[argh(
        option,
        default = "0x69",
        from_str_fn(from_base_16),
        description = "sensor address in hex (69 or 68)"
    )]
    addr: u8,
    #[argh(option, default = "2000", description = "milliseconds between readings")]
    interval: u64,
    #[argh(
        option,
        default = "150",
        description = "minimum milliseconds between published readings"
    )]
    display_rate: u64,
    #[argh(option, default = "5000", description = "milliseconds to wait after the first reading")]
    settle: u64,
}

fn from_base_16(val: &str) -> Result<u8, String> {
    let no_prefix = val.trim_start_matches("0x");

    match u8::from_str_radix(no_prefix, 16) {
        Ok(v) => Ok(v),
        Err(_) => {
            Err("Unable to convert address from base 16".into())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: InputArgs = argh::from_env();

    let i2c = I2cdev::new(&args.bus).wrap_err_with(|| format!("failed to open {}", args.bus))?;
    let mut ge = GridEye::new(i2c);
    ge.set_address(args.addr);
    info!(bus = %args.bus, addr = format_args!("{:#04x}", args.addr), "sensor configured");

    let timing = Timing {
        interval: Duration::from_millis(args.interval),
        display_rate: Duration::from_millis(args.display_rate),
        settle: Duration::from_millis(args.settle),
    };

    let mut poller = Poller::new(HeatSensor::new(ge), Publisher::new(io::stdout()), timing);
    poller.setup()?;
    poller.run()?;

    Ok(())
}
