//! Board glue: battery reading and boot-button timing.
//!
//! Thin, host-testable pieces; anything that needs vendor APIs (deep
//! sleep entry, ADC calibration, rail sequencing) stays with the
//! firmware binary.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

pub mod types;
pub use types::ResetReason;

/// Full-scale voltage of the battery divider.
pub const VBAT_FULL_SCALE: f32 = 7.05;

/// Maximum 12-bit ADC count.
pub const ADC_MAX: f32 = 4095.0;

/// Poll interval while measuring a button hold.
const BUTTON_POLL_MS: u32 = 50;

/// Longest button hold worth measuring.
const BUTTON_MAX_WAIT_MS: u32 = 10_000;

/// Battery voltage from a raw 12-bit ADC reading.
pub fn battery_voltage(raw: u16) -> f32 {
    let volt = f32::from(raw) / ADC_MAX * VBAT_FULL_SCALE;
    log::debug!("battery voltage: {} V (raw {})", volt, raw);
    volt
}

/// Measure how long the boot button is held, in milliseconds.
///
/// Returns 0 when the button is not pressed (active low, pull-up).
/// Otherwise polls every 50 ms until release, capped at 10 s. The
/// result is quantized to the poll interval, which is plenty for
/// telling a tap from a long press at boot.
pub fn press_duration<P, D>(button: &mut P, delay: &mut D) -> u32
where
    P: InputPin,
    D: DelayNs,
{
    if button.is_high().unwrap_or(true) {
        return 0;
    }

    log::debug!("button press detected at boot, measuring duration...");
    let mut elapsed_ms = 0;
    while button.is_low().unwrap_or(false) {
        delay.delay_ms(BUTTON_POLL_MS);
        elapsed_ms += BUTTON_POLL_MS;
        if elapsed_ms >= BUTTON_MAX_WAIT_MS {
            break;
        }
    }

    log::debug!("button press duration: {} ms", elapsed_ms);
    elapsed_ms
}
