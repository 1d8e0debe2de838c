//! Debounce timer vector

use defmt::*;

use crate::channels::{DEBOUNCE_TICK, SUPERVISOR};

#[embassy_executor::task]
pub async fn debounce_task(tick_us: u32) {
    info!("Debounce task started ({} us ticks)", tick_us);

    DEBOUNCE_TICK
        .run(tick_us, || {
            if SUPERVISOR.with(|s| s.on_debounce_tick()) == Some(true) {
                trace!("Debounce window elapsed, button re-armed");
            }
        })
        .await
}
