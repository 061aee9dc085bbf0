use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use linux_embedded_hal::I2cdev;
        use grideye::*;
        use argh::FromArgs;
        // grideye::Error implements core::error::Error, so `?` converts it into an eyre Report.
        use eyre::Result;
        use std::thread::sleep;
        use std::time::Duration;

        #[derive(FromArgs)]
        #[argh(description = "print grideye frames as an 8x8 grid")]
        struct InputArgs {
            #[argh(positional)]
            bus: String,
            #[argh(positional, from_str_fn(from_base_16))]
            addr: u8,
            #[argh(option, short='n', default = "1", description = "number of frames to print")]
            num: u32,
            #[argh(switch, short='s', description = "sample at 1 FPS instead of 10 FPS")]
            slow: bool,
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
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<()> {
    let args: InputArgs = argh::from_env();

    let i2c: I2cdev = I2cdev::new(args.bus)?;
    let mut ge = GridEye::new(i2c);
    ge.set_address(args.addr);

    ge.set_power_mode(PowerMode::Normal)?;
    let (rate, period) = if args.slow {
        (Framerate::Fps1, Duration::from_millis(1000))
    } else {
        (Framerate::Fps10, Duration::from_millis(100))
    };
    ge.set_framerate(rate)?;

    for i in 0..args.num {
        let frame = ge.frame()?;
        let device = ge.device_temperature()?;

        println!("frame {} (thermistor {} C)", i, device);
        for row in frame.chunks_exact(8) {
            for px in row {
                print!("{:>8.2}", px.celsius());
            }
            println!();
        }

        let status = ge.status()?;
        if !status.pixel_output_ok() {
            println!("pixel output overflowed");
            ge.clear_status(Clear::PixelOverflow)?;
        }

        sleep(period);
    }

    let _i2c = ge.free();

    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}
