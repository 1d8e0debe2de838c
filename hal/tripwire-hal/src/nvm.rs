//! Non-volatile byte storage
//!
//! Byte-addressed storage that survives resets (EEPROM or an emulation of
//! it). Addresses run from 0 to `capacity() - 1`.

/// Errors from non-volatile storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NvmError {
    /// Address outside the storage range
    AddressOutOfRange,
    /// Programming the backing memory failed
    WriteFailed,
    /// The backing memory could not be read back
    ReadFailed,
}

/// Byte-addressed persistent store
///
/// Implementations wait for the memory controller to become idle before
/// each access; that wait is bounded by the hardware and never surfaced.
pub trait ByteStore {
    /// Number of addressable bytes
    fn capacity(&self) -> u16;

    /// Read one byte
    fn read_byte(&mut self, address: u16) -> Result<u8, NvmError>;

    /// Write one byte
    fn write_byte(&mut self, address: u16, data: u8) -> Result<(), NvmError>;

    /// Check whether an address is inside the store
    fn contains(&self, address: u16) -> bool {
        address < self.capacity()
    }

    /// Read a little-endian 16-bit word stored at `address` and `address + 1`
    fn read_word(&mut self, address: u16) -> Result<u16, NvmError> {
        let high_address = address.checked_add(1).ok_or(NvmError::AddressOutOfRange)?;
        if !self.contains(high_address) {
            return Err(NvmError::AddressOutOfRange);
        }
        let low = self.read_byte(address)?;
        let high = self.read_byte(high_address)?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write a little-endian 16-bit word to `address` and `address + 1`
    fn write_word(&mut self, address: u16, data: u16) -> Result<(), NvmError> {
        let high_address = address.checked_add(1).ok_or(NvmError::AddressOutOfRange)?;
        if !self.contains(high_address) {
            return Err(NvmError::AddressOutOfRange);
        }
        let [low, high] = data.to_le_bytes();
        self.write_byte(address, low)?;
        self.write_byte(high_address, high)
    }
}
