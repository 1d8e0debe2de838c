//! Button edge vector

use defmt::*;
use embassy_rp::gpio::Input;
use tripwire_core::EdgeOutcome;
use tripwire_hal_rp2040::EdgeWait;

use crate::channels::{BUTTON_EDGE, SUPERVISOR};

/// Dispatch unmasked button edges to the supervisor
///
/// Ends once the input is cleared at lockdown; dropping the pin
/// disconnects its pull-up.
#[embassy_executor::task]
pub async fn edge_task(mut button: Input<'static>) {
    info!("Edge task started");

    while BUTTON_EDGE.next_edge(&mut button).await == EdgeWait::Edge {
        match SUPERVISOR.with(|s| s.on_edge()) {
            Some(EdgeOutcome::Pressed) => info!("Button pressed, watchdog acknowledged"),
            Some(outcome) => trace!("Edge: {}", outcome),
            None => warn!("Edge before supervisor init"),
        }
    }

    info!("Button input released");
}
