//! Character output stream
//!
//! Used purely for observability: the core reports fault counts and
//! lockdown through it, nothing reads it back.

use core::fmt::Write;

use heapless::String;

/// Scratch capacity for one formatted number
const NUMBER_BUF_LEN: usize = 20;

/// Text/numeric output stream
///
/// Only `write_str` is required. Transmission is blocking: implementations
/// wait for the transmit buffer to drain, which is bounded by the baud rate.
pub trait TextSink {
    /// Write a string verbatim
    fn write_str(&mut self, s: &str);

    /// Emit text
    fn emit(&mut self, s: &str) {
        self.write_str(s);
    }

    /// Emit an unsigned integer in decimal
    fn emit_unsigned(&mut self, value: u32) {
        let mut buf: String<NUMBER_BUF_LEN> = String::new();
        // A u32 never exceeds ten digits, the write cannot fail
        let _ = write!(buf, "{}", value);
        self.write_str(&buf);
    }

    /// Emit a signed integer in decimal
    fn emit_signed(&mut self, value: i32) {
        let mut buf: String<NUMBER_BUF_LEN> = String::new();
        let _ = write!(buf, "{}", value);
        self.write_str(&buf);
    }

    /// Emit a number with two decimals, rounded half away from zero
    fn emit_float(&mut self, value: f32) {
        let mut buf: String<NUMBER_BUF_LEN> = String::new();
        let _ = format_hundredths(&mut buf, value);
        self.write_str(&buf);
    }

    /// Terminate the current line
    fn new_line(&mut self) {
        self.write_str("\n");
    }

    /// Emit text followed by a line break
    fn emit_line(&mut self, s: &str) {
        self.write_str(s);
        self.new_line();
    }
}

/// Format `value` as `[-]int.dd`
fn format_hundredths<W: Write>(out: &mut W, value: f32) -> core::fmt::Result {
    let negative = value < 0.0;
    let magnitude = if negative { -value } else { value };
    let scaled = (magnitude * 100.0 + 0.5) as u32;
    let sign = if negative && scaled != 0 { "-" } else { "" };
    write!(out, "{}{}.{:02}", sign, scaled / 100, scaled % 100)
}
