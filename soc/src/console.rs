//! Console logging over the UART core, mirrored to defmt.
//!
//! Every line goes through defmt over RTT when a probe is attached. Lines at
//! or above [`CONSOLE_LEVEL`] also go out as `"[L] message\r\n"` on the
//! UART, which is what a serial terminal on the board sees.
//!
//! # Usage
//!
//! ```ignore
//! use sensor_demos_soc::{log_info, log_warn};
//!
//! console::install(uart);
//! log_info!("Temperature: {:.2} C", celsius);
//! log_warn!("Unexpected device ID {:#04x}", id);
//! ```

use core::fmt;

use heapless::String;

use crate::config::CONSOLE_LEVEL;

/// Maximum characters per log line; a message that does not fit is cut short.
pub const LOG_MSG_LEN: usize = 96;

/// Buffer the log macros format into.
pub type LogLine = String<LOG_MSG_LEN>;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }

    /// `true` if this level is at or above `threshold`.
    #[inline]
    pub const fn passes(
        self,
        threshold: Self,
    ) -> bool {
        self as u8 >= threshold as u8
    }
}

/// Write one console line: `[L] message` followed by CR LF.
pub fn write_line<W: fmt::Write + ?Sized>(
    out: &mut W,
    level: LogLevel,
    message: &str,
) -> fmt::Result {
    write!(out, "[{}] {}\r\n", level.prefix(), message)
}

/// Write a console line unless `level` is below [`CONSOLE_LEVEL`].
pub fn forward<W: fmt::Write + ?Sized>(
    out: &mut W,
    level: LogLevel,
    message: &str,
) -> fmt::Result {
    if !level.passes(CONSOLE_LEVEL) {
        return Ok(());
    }
    write_line(out, level, message)
}

#[cfg(target_arch = "arm")]
mod sink {
    use core::cell::RefCell;

    use embassy_sync::blocking_mutex::Mutex;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    use super::{LogLevel, forward};
    use crate::config::CONSOLE_LEVEL;
    use crate::cores::UartCore;
    use crate::mmio::Slot;

    /// The UART that console lines go to, once installed.
    static CONSOLE: Mutex<CriticalSectionRawMutex, RefCell<Option<UartCore<Slot>>>> =
        Mutex::new(RefCell::new(None));

    /// Route console output to `uart`. Lines logged before this only reach defmt.
    pub fn install(uart: UartCore<Slot>) { CONSOLE.lock(|console| *console.borrow_mut() = Some(uart)); }

    pub fn emit(
        level: LogLevel,
        message: &str,
    ) {
        if level.passes(CONSOLE_LEVEL) {
            CONSOLE.lock(|console| {
                if let Some(uart) = console.borrow_mut().as_mut() {
                    let _ = forward(uart, level, message);
                }
            });
        }

        match level {
            LogLevel::Debug => defmt::debug!("{=str}", message),
            LogLevel::Info => defmt::info!("{=str}", message),
            LogLevel::Warn => defmt::warn!("{=str}", message),
            LogLevel::Error => defmt::error!("{=str}", message),
        }
    }
}

#[cfg(target_arch = "arm")]
pub use sink::{emit, install};

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf = $crate::console::LogLine::new();
        let _ = write!(buf, $($arg)*);
        $crate::console::emit($crate::console::LogLevel::Info, buf.as_str());
    }};
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf = $crate::console::LogLine::new();
        let _ = write!(buf, $($arg)*);
        $crate::console::emit($crate::console::LogLevel::Warn, buf.as_str());
    }};
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf = $crate::console::LogLine::new();
        let _ = write!(buf, $($arg)*);
        $crate::console::emit($crate::console::LogLevel::Error, buf.as_str());
    }};
}

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf = $crate::console::LogLine::new();
        let _ = write!(buf, $($arg)*);
        $crate::console::emit($crate::console::LogLevel::Debug, buf.as_str());
    }};
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(LogLevel::Debug.prefix(), 'D');
        assert_eq!(LogLevel::Info.prefix(), 'I');
        assert_eq!(LogLevel::Warn.prefix(), 'W');
        assert_eq!(LogLevel::Error.prefix(), 'E');
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_level_threshold() {
        assert!(LogLevel::Error.passes(LogLevel::Info));
        assert!(LogLevel::Info.passes(LogLevel::Info));
        assert!(!LogLevel::Debug.passes(LogLevel::Info));
        assert!(LogLevel::Debug.passes(LogLevel::Debug));
    }

    #[test]
    fn test_forward_drops_lines_below_console_level() {
        let mut out = std::string::String::new();
        forward(&mut out, LogLevel::Debug, "pitch 120 mm").unwrap();
        assert!(out.is_empty());

        forward(&mut out, LogLevel::Info, "Temperature: 21.50 C").unwrap();
        assert_eq!(out, "[I] Temperature: 21.50 C\r\n");
    }

    #[test]
    fn test_line_format() {
        let mut out = std::string::String::new();
        write_line(&mut out, LogLevel::Warn, "ID mismatch").unwrap();
        assert_eq!(out, "[W] ID mismatch\r\n");
    }

    #[test]
    fn test_temperature_line() {
        let mut buf = LogLine::new();
        write!(buf, "Temperature: {:.2} C", -4.5f32).unwrap();
        assert_eq!(buf.as_str(), "Temperature: -4.50 C");
    }

    #[test]
    fn test_long_message_does_not_overflow() {
        let mut buf = LogLine::new();
        let long = "x".repeat(LOG_MSG_LEN + 10);
        assert!(write!(buf, "{long}").is_err());
        assert!(buf.len() <= LOG_MSG_LEN);
    }
}
