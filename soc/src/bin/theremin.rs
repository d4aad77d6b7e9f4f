//! Theremin firmware: two ultrasonic sensors drive the DDFS and the LEDs.
//!
//! Pitch sensor on slot 3, volume sensor on slot 4. The LED bank flashes
//! once at start-up, then shows one bar per sensor.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
mod firmware {
    use cortex_m_rt::entry;
    use defmt_rtt as _;
    use panic_probe as _;
    use sensor_demos_common::config::{BASE_FREQ_HZ, HIGH_FREQ_HZ};
    use sensor_demos_common::{Reading, Shutdown, Theremin, run};
    use sensor_demos_soc::config::{
        BRIDGE_BASE,
        DDFS_SLOT,
        LED_SLOT,
        PITCH_SENSOR_SLOT,
        TIMER_SLOT,
        UART_BAUD,
        UART_SLOT,
        VOLUME_SENSOR_SLOT,
    };
    use sensor_demos_soc::cores::{DdfsCore, GpoCore, TimerCore, UartCore, UltrasonicCore};
    use sensor_demos_soc::{Slot, console, log_debug, log_info, log_warn};

    /// Never requested on hardware; the loop runs until power-off.
    static SHUTDOWN: Shutdown = Shutdown::new();

    #[entry]
    fn main() -> ! {
        // SAFETY: slot numbers come from the hardware build's slot map and
        // each core gets exactly one handle.
        let (timer, uart, leds, pitch, volume, ddfs) = unsafe {
            (
                Slot::new(BRIDGE_BASE, TIMER_SLOT),
                Slot::new(BRIDGE_BASE, UART_SLOT),
                Slot::new(BRIDGE_BASE, LED_SLOT),
                Slot::new(BRIDGE_BASE, PITCH_SENSOR_SLOT),
                Slot::new(BRIDGE_BASE, VOLUME_SENSOR_SLOT),
                Slot::new(BRIDGE_BASE, DDFS_SLOT),
            )
        };

        console::install(UartCore::new(uart, UART_BAUD));
        log_info!("Theremin start, {} Hz to {} Hz", BASE_FREQ_HZ, HIGH_FREQ_HZ);

        let mut delay = TimerCore::new(timer);
        let mut tone = DdfsCore::new(ddfs);
        tone.init();

        let mut app = Theremin::new(
            UltrasonicCore::new(pitch),
            UltrasonicCore::new(volume),
            tone,
            GpoCore::new(leds),
        );
        app.startup(&mut delay);
        log_info!("Ready after {} us", delay.read_time_us());

        run(&mut app, &mut delay, &SHUTDOWN, |result| {
            let Ok(report) = result;
            for (name, reading) in [("pitch", report.pitch), ("volume", report.volume)] {
                if reading == Reading::Fault {
                    log_warn!("{} sensor did not finish", name);
                }
            }
            log_debug!(
                "pitch {:?} volume {:?} -> {:?} Hz, env {:.2}",
                report.pitch,
                report.volume,
                report.actuation.frequency,
                report.actuation.envelope
            );
        });

        loop {
            cortex_m::asm::wfi();
        }
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("theremin: build for the soft-core target (thumbv7m-none-eabi); use the simulator on the host");
}
