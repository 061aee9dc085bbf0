use embedded_hal::i2c::I2c;
use grideye::*;

mod common;

// Needs a sensor at 0x69 on /dev/i2c-1: cargo test -- --ignored
#[test]
#[ignore]
fn test_sample() {
    let hal = common::setup();
    #[allow(unused_mut)]
    let mut ge = GridEye::new(hal);

    #[cfg(any(target_os = "linux", target_os = "android"))]
    sample(ge);
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    unimplemented(ge);
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn sample<T>(mut ge: GridEye<T>) where T: I2c {
    // Only holds somewhere between freezing and the sensor's 80 C ceiling.
    let device = ge.device_temperature().unwrap_or_default();
    assert!(device.celsius() > 0.0 && device.celsius() < 80.0);

    assert!(ge.status().map(|s| s.device_output_ok()).unwrap_or(false));

    let frame = ge.frame().unwrap_or([Temperature::ZERO; PIXELS]);
    assert!(frame.iter().any(|t| t.celsius() != 0.0));
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn unimplemented<T>(mut ge: GridEye<T>) where T: I2c {
    assert!(ge.device_temperature().is_err());
}
