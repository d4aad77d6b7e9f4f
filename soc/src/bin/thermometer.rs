//! Thermometer firmware: ADT7420 over I2C, shown on the seven-segment display.
//!
//! Prints the reading on the UART console once per second. A device-ID
//! mismatch at start-up is reported and the loop runs anyway.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
mod firmware {
    use cortex_m_rt::entry;
    use defmt_rtt as _;
    use panic_probe as _;
    use sensor_demos_common::adt7420::{Adt7420, Identity};
    use sensor_demos_common::config::{ADT7420_ADDRESS, ADT7420_DEVICE_ID};
    use sensor_demos_common::{Shutdown, Thermometer, run};
    use sensor_demos_soc::config::{
        BRIDGE_BASE,
        I2C_FREQ_HZ,
        I2C_SLOT,
        SSEG_SLOT,
        TIMER_SLOT,
        UART_BAUD,
        UART_SLOT,
    };
    use sensor_demos_soc::cores::{I2cCore, SsegCore, TimerCore, UartCore};
    use sensor_demos_soc::{Slot, console, log_error, log_info, log_warn};

    /// Never requested on hardware; the loop runs until power-off.
    static SHUTDOWN: Shutdown = Shutdown::new();

    #[entry]
    fn main() -> ! {
        // SAFETY: slot numbers come from the hardware build's slot map and
        // each core gets exactly one handle.
        let (timer, uart, sseg, i2c) = unsafe {
            (
                Slot::new(BRIDGE_BASE, TIMER_SLOT),
                Slot::new(BRIDGE_BASE, UART_SLOT),
                Slot::new(BRIDGE_BASE, SSEG_SLOT),
                Slot::new(BRIDGE_BASE, I2C_SLOT),
            )
        };

        console::install(UartCore::new(uart, UART_BAUD));
        log_info!("Thermometer start, ADT7420 at {:#04x}", ADT7420_ADDRESS);

        let mut delay = TimerCore::new(timer);
        let sensor = Adt7420::new(I2cCore::new(i2c, I2C_FREQ_HZ));
        let mut app = Thermometer::new(sensor, SsegCore::new(sseg));

        match app.verify_sensor() {
            Ok(Identity::Matched) => log_info!("ADT7420 detected"),
            Ok(Identity::Mismatch(id)) => {
                log_warn!("Unexpected device ID {:#04x} (expected {:#04x})", id, ADT7420_DEVICE_ID);
            },
            Err(e) => log_error!("ID read failed: {}", e),
        }
        log_info!("Ready after {} us", delay.read_time_us());

        run(&mut app, &mut delay, &SHUTDOWN, |result| match result {
            Ok(report) => log_info!("Temperature: {:.2} C", report.celsius),
            Err(e) => log_error!("Temperature read failed: {}", e),
        });

        loop {
            cortex_m::asm::wfi();
        }
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("thermometer: build for the soft-core target (thumbv7m-none-eabi); use the simulator on the host");
}
