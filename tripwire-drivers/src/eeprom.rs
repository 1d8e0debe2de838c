//! EEPROM emulation on NOR flash
//!
//! Byte reads and writes go to a RAM image ([`EepromImage`]) through an
//! [`EepromStore`] handle, so they are cheap enough to run inside a
//! critical section. A write that changes a byte flags the image dirty;
//! [`FlashEeprom`] then stores the whole image as one sequential-storage
//! map item. The map keeps the previous item until the new one is fully
//! written, so a commit cut short by a reset leaves the last committed
//! image readable, and successive commits are spread over every page of
//! the partition.

use core::cell::RefCell;
use core::ops::Range;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_storage_async::nor_flash::NorFlash;
use portable_atomic::{AtomicBool, Ordering};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{self, Key, SerializationError};
use tripwire_hal::{ByteStore, NvmError};

/// Emulated EEPROM size, as on an ATmega328P
pub const EEPROM_SIZE: usize = 1024;

/// Scratch space for one serialized map item (key plus image)
const ITEM_BUFFER_LEN: usize = EEPROM_SIZE + 64;

/// Keys stored in the EEPROM partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EepromKey {
    /// The full byte image
    Image = 0,
}

impl Key for EepromKey {
    fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        if buffer.is_empty() {
            return Err(SerializationError::BufferTooSmall);
        }
        buffer[0] = *self as u8;
        Ok(1)
    }

    fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), SerializationError> {
        match buffer.first() {
            Some(0) => Ok((EepromKey::Image, 1)),
            Some(_) => Err(SerializationError::InvalidFormat),
            None => Err(SerializationError::BufferTooSmall),
        }
    }
}

/// RAM copy of the emulated EEPROM
///
/// Starts zeroed, which is also what an empty partition loads as.
pub struct EepromImage {
    bytes: Mutex<CriticalSectionRawMutex, RefCell<[u8; EEPROM_SIZE]>>,
    dirty: AtomicBool,
    changed: Signal<CriticalSectionRawMutex, ()>,
}

impl EepromImage {
    pub const fn new() -> Self {
        Self {
            bytes: Mutex::new(RefCell::new([0; EEPROM_SIZE])),
            dirty: AtomicBool::new(false),
            changed: Signal::new(),
        }
    }

    /// Byte store handle over this image
    pub fn store(&self) -> EepromStore<'_> {
        EepromStore { image: self }
    }

    /// Check whether a write is waiting to be committed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Wait for a write that changed the image, and take the dirty flag
    pub async fn changed(&self) {
        loop {
            if self.dirty.swap(false, Ordering::AcqRel) {
                return;
            }
            self.changed.wait().await;
        }
    }

    fn read(&self, index: usize) -> Option<u8> {
        self.bytes.lock(|bytes| bytes.borrow().get(index).copied())
    }

    /// Returns `None` when out of range
    fn write(&self, index: usize, data: u8) -> Option<()> {
        let changed = self.bytes.lock(|bytes| {
            let mut bytes = bytes.borrow_mut();
            let slot = bytes.get_mut(index)?;
            let changed = *slot != data;
            *slot = data;
            Some(changed)
        })?;

        if changed {
            self.dirty.store(true, Ordering::Release);
            self.changed.signal(());
        }
        Some(())
    }

    fn snapshot(&self) -> [u8; EEPROM_SIZE] {
        self.bytes.lock(|bytes| *bytes.borrow())
    }

    fn replace(&self, image: &[u8; EEPROM_SIZE]) {
        self.bytes.lock(|bytes| *bytes.borrow_mut() = *image);
    }
}

impl Default for EepromImage {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte store over an [`EepromImage`]
///
/// Never touches flash; persistence is up to the [`FlashEeprom`] sharing
/// the image.
pub struct EepromStore<'a> {
    image: &'a EepromImage,
}

impl ByteStore for EepromStore<'_> {
    fn capacity(&self) -> u16 {
        EEPROM_SIZE as u16
    }

    fn read_byte(&mut self, address: u16) -> Result<u8, NvmError> {
        self.image
            .read(address as usize)
            .ok_or(NvmError::AddressOutOfRange)
    }

    fn write_byte(&mut self, address: u16, data: u8) -> Result<(), NvmError> {
        self.image
            .write(address as usize, data)
            .ok_or(NvmError::AddressOutOfRange)
    }
}

/// Flash persistence for an [`EepromImage`]
pub struct FlashEeprom<'a, F> {
    flash: F,
    range: Range<u32>,
    image: &'a EepromImage,
}

impl<'a, F: NorFlash> FlashEeprom<'a, F> {
    /// Persist `image` in `range`, which must span at least two erase pages
    pub fn new(flash: F, range: Range<u32>, image: &'a EepromImage) -> Self {
        Self {
            flash,
            range,
            image,
        }
    }

    /// Copy the last committed image into RAM
    ///
    /// Returns `Ok(false)` when nothing has been committed yet; the image
    /// is left untouched in that case.
    pub async fn load(&mut self) -> Result<bool, NvmError> {
        let mut buffer = [0u8; ITEM_BUFFER_LEN];

        let stored = map::fetch_item::<EepromKey, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut buffer,
            &EepromKey::Image,
        )
        .await
        .map_err(|_| NvmError::ReadFailed)?;

        match stored {
            Some(bytes) => {
                let image: &[u8; EEPROM_SIZE] =
                    bytes.try_into().map_err(|_| NvmError::ReadFailed)?;
                self.image.replace(image);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store the current image
    ///
    /// On failure the previously committed image stays in flash; the next
    /// change commits the whole image again.
    pub async fn commit(&mut self) -> Result<(), NvmError> {
        let snapshot = self.image.snapshot();
        let data: &[u8] = &snapshot;
        let mut buffer = [0u8; ITEM_BUFFER_LEN];

        map::store_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut buffer,
            &EepromKey::Image,
            &data,
        )
        .await
        .map_err(|_| NvmError::WriteFailed)
    }

    /// Wait for the next change to the image and commit it
    pub async fn sync(&mut self) -> Result<(), NvmError> {
        self.image.changed().await;
        self.commit().await
    }

    /// Erase the partition and zero the image
    ///
    /// Recovery path for a partition that no longer parses.
    pub async fn format(&mut self) -> Result<(), NvmError> {
        self.flash
            .erase(self.range.start, self.range.end)
            .await
            .map_err(|_| NvmError::WriteFailed)?;
        self.image.replace(&[0; EEPROM_SIZE]);
        Ok(())
    }

    /// Give back the flash
    pub fn release(self) -> F {
        self.flash
    }
}
