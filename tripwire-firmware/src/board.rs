//! Raspberry Pi Pico wiring
//!
//! | Function        | Pin    |
//! |-----------------|--------|
//! | Console TX      | GPIO0  |
//! | Button (to GND) | GPIO13 |
//! | PWM LEDs        | GPIO16, GPIO17, GPIO18 |
//! | Indicator LED   | GPIO25 (on-board) |
//! | Potentiometer   | GPIO26 (ADC0) |

use tripwire_core::Board;
use tripwire_drivers::{EepromStore, FlashEeprom, LedGroup};
use tripwire_hal_rp2040::{
    AdcInput, ButtonLevel, EdgeLine, PicoFlash, PinOutput, SoftWatchdog, TickLine, UartConsole,
};

/// Board pin number of the button
pub const BUTTON_PIN: u8 = 13;

/// LEDs driven together by the software PWM
pub const PWM_LED_COUNT: usize = 3;

/// Flash persistence of the emulated EEPROM
pub type PicoEeprom = FlashEeprom<'static, PicoFlash<'static>>;

/// Peripheral types of the Pico build
pub struct PicoBoard;

impl Board for PicoBoard {
    type Button = ButtonLevel;
    type EdgeLine = EdgeLine;
    type DebounceTick = TickLine;
    type HeartbeatTick = TickLine;
    type FaultTimer = SoftWatchdog;
    type Store = EepromStore<'static>;
    type Console = UartConsole<'static>;
    type Indicator = PinOutput<'static>;
    type PwmOutput = LedGroup<PinOutput<'static>, PWM_LED_COUNT>;
    type Analog = AdcInput<'static>;
}
