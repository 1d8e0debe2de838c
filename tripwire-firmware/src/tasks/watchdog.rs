//! Watchdog timeout vector

use defmt::*;
use embassy_rp::watchdog::Watchdog;
use tripwire_core::fault::TimeoutOutcome;
use tripwire_hal_rp2040::watchdog::Expiry;

use crate::channels::{SUPERVISOR, WATCHDOG};

#[embassy_executor::task]
pub async fn watchdog_task(hardware: Watchdog) {
    info!("Watchdog task started");
    WATCHDOG.run(hardware, on_timeout, on_expiry).await
}

fn on_timeout() {
    match SUPERVISOR.with(|s| s.on_watchdog_timeout()) {
        Some(Ok(TimeoutOutcome::Counted(count))) => info!("Watchdog timeout {}", count),
        Some(Ok(TimeoutOutcome::Lockdown(count))) => {
            warn!("Watchdog timeout {}: system lockdown", count)
        }
        Some(Ok(TimeoutOutcome::Ignored)) => trace!("Watchdog timeout during lockdown"),
        Some(Err(e)) => error!("Fault counter not persisted: {}", e),
        None => warn!("Watchdog timeout before supervisor init"),
    }
}

fn on_expiry(expiry: Expiry) {
    if expiry == Expiry::Reset {
        warn!("Watchdog expired with interrupt disabled, resetting");
    }
}
