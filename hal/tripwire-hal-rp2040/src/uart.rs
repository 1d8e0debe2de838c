//! Blocking UART console

use embassy_rp::uart::{Blocking, UartTx};
use tripwire_hal::TextSink;

/// Console on a UART transmitter
///
/// Line feeds go out as CR LF. Transmit errors are dropped: the console is
/// for observation only.
pub struct UartConsole<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> UartConsole<'d> {
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl TextSink for UartConsole<'_> {
    fn write_str(&mut self, s: &str) {
        let mut lines = s.split('\n');
        if let Some(first) = lines.next() {
            let _ = self.tx.blocking_write(first.as_bytes());
        }
        for line in lines {
            let _ = self.tx.blocking_write(b"\r\n");
            let _ = self.tx.blocking_write(line.as_bytes());
        }
    }
}
