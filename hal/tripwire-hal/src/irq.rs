//! Pin-change interrupt control
//!
//! An edge-triggered input has two switches: the vector (global enable plus
//! the port group's enable bit, possibly shared by several pins) and the
//! per-pin mask bit. Either edge fires the vector.

/// Edge interrupt line for one input pin
pub trait EdgeInterrupt {
    /// Enable interrupts globally and enable the port group's vector
    fn enable_vector(&mut self);

    /// Set the pin's mask bit so edges on it reach the vector
    fn set_mask(&mut self);

    /// Clear the pin's mask bit
    ///
    /// Leaves the vector enabled: other pins may share it.
    fn clear_mask(&mut self);

    /// Check whether the pin's mask bit is set
    fn is_masked_in(&self) -> bool;

    /// Disconnect the internal pull-up resistor
    fn release_pull_up(&mut self);
}
