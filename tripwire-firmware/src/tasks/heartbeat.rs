//! Heartbeat timer vector

use defmt::*;

use crate::channels::{HEARTBEAT_TICK, SUPERVISOR};

#[embassy_executor::task]
pub async fn heartbeat_task(tick_us: u32) {
    info!("Heartbeat task started ({} us ticks)", tick_us);

    HEARTBEAT_TICK
        .run(tick_us, || {
            SUPERVISOR.with(|s| s.on_heartbeat_tick());
        })
        .await
}
