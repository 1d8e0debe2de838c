//! EEPROM commit task

use defmt::*;

use crate::board::PicoEeprom;

/// Commit every change of the EEPROM image to flash
#[embassy_executor::task]
pub async fn eeprom_task(mut eeprom: PicoEeprom) {
    info!("EEPROM task started");

    loop {
        match eeprom.sync().await {
            Ok(()) => debug!("EEPROM image committed"),
            Err(e) => error!("EEPROM commit failed: {}", e),
        }
    }
}
