//! Host-side collaborators for unit tests
//!
//! Each mock is a cheap handle: clones share state, so a test keeps one
//! clone to inspect while the code under test owns the other.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use tripwire_hal::{
    AnalogInput, ByteStore, EdgeInterrupt, FaultTimer, InputPin, NvmError, OutputPin, TextSink,
    TickSource, WatchdogTimeout,
};

use crate::supervisor::Board;

#[derive(Clone, Default)]
pub struct MockInput {
    high: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, high: bool) {
        self.high.set(high);
    }
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}

#[derive(Clone, Copy)]
struct EdgeBits {
    vector: bool,
    mask: bool,
    pull_up: bool,
}

#[derive(Clone)]
pub struct MockEdgeLine {
    bits: Rc<Cell<EdgeBits>>,
}

impl MockEdgeLine {
    pub fn new() -> Self {
        Self {
            bits: Rc::new(Cell::new(EdgeBits {
                vector: false,
                mask: false,
                pull_up: true,
            })),
        }
    }

    fn update(&self, f: impl FnOnce(&mut EdgeBits)) {
        let mut bits = self.bits.get();
        f(&mut bits);
        self.bits.set(bits);
    }

    pub fn vector_enabled(&self) -> bool {
        self.bits.get().vector
    }

    pub fn masked_in(&self) -> bool {
        self.bits.get().mask
    }

    pub fn pull_up_enabled(&self) -> bool {
        self.bits.get().pull_up
    }
}

impl EdgeInterrupt for MockEdgeLine {
    fn enable_vector(&mut self) {
        self.update(|b| b.vector = true);
    }

    fn set_mask(&mut self) {
        self.update(|b| b.mask = true);
    }

    fn clear_mask(&mut self) {
        self.update(|b| b.mask = false);
    }

    fn is_masked_in(&self) -> bool {
        self.bits.get().mask
    }

    fn release_pull_up(&mut self) {
        self.update(|b| b.pull_up = false);
    }
}

#[derive(Clone)]
pub struct MockTick {
    tick_us: u32,
    running: Rc<Cell<bool>>,
}

impl MockTick {
    pub fn new(tick_us: u32) -> Self {
        Self {
            tick_us,
            running: Rc::new(Cell::new(false)),
        }
    }

    pub fn running(&self) -> bool {
        self.running.get()
    }
}

impl TickSource for MockTick {
    fn tick_us(&self) -> u32 {
        self.tick_us
    }

    fn start(&mut self) {
        self.running.set(true);
    }

    fn stop(&mut self) {
        self.running.set(false);
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Output latch recording every level written
#[derive(Clone, Default)]
pub struct MockOutput {
    high: Rc<Cell<bool>>,
    history: Rc<RefCell<Vec<bool>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        self.high.set(true);
        self.history.borrow_mut().push(true);
    }

    fn set_low(&mut self) {
        self.high.set(false);
        self.history.borrow_mut().push(false);
    }

    fn is_set_high(&self) -> bool {
        self.high.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WdtOp {
    Init(WatchdogTimeout),
    Feed,
    EnableInterrupt,
    DisableInterrupt,
    EnableSystemReset,
    DisableSystemReset,
    Clear,
}

#[derive(Default)]
struct WdtLog {
    ops: Vec<WdtOp>,
    irq: bool,
}

#[derive(Clone, Default)]
pub struct MockFaultTimer {
    log: Rc<RefCell<WdtLog>>,
}

impl MockFaultTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<WdtOp> {
        self.log.borrow().ops.clone()
    }

    pub fn interrupt_enabled(&self) -> bool {
        self.log.borrow().irq
    }

    fn record(&self, op: WdtOp) {
        self.log.borrow_mut().ops.push(op);
    }
}

impl FaultTimer for MockFaultTimer {
    fn init(&mut self, timeout: WatchdogTimeout) {
        self.record(WdtOp::Init(timeout));
    }

    fn feed(&mut self) {
        self.record(WdtOp::Feed);
    }

    fn enable_interrupt(&mut self) {
        self.record(WdtOp::EnableInterrupt);
        self.log.borrow_mut().irq = true;
    }

    fn disable_interrupt(&mut self) {
        self.record(WdtOp::DisableInterrupt);
        self.log.borrow_mut().irq = false;
    }

    fn enable_system_reset(&mut self) {
        self.record(WdtOp::EnableSystemReset);
    }

    fn disable_system_reset(&mut self) {
        self.record(WdtOp::DisableSystemReset);
    }

    fn clear(&mut self) {
        self.record(WdtOp::Clear);
        self.log.borrow_mut().irq = false;
    }
}

const STORE_LEN: usize = 1024;

/// 1 KiB byte store, erased to zero
#[derive(Clone)]
pub struct MockStore {
    bytes: Rc<RefCell<[u8; STORE_LEN]>>,
    writes: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            bytes: Rc::new(RefCell::new([0; STORE_LEN])),
            writes: Rc::new(Cell::new(0)),
            fail: Rc::new(Cell::new(false)),
        }
    }

    /// Set a byte without counting it as a write
    pub fn poke(&self, address: u16, data: u8) {
        self.bytes.borrow_mut()[address as usize] = data;
    }

    pub fn peek(&self, address: u16) -> u8 {
        self.bytes.borrow()[address as usize]
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl ByteStore for MockStore {
    fn capacity(&self) -> u16 {
        STORE_LEN as u16
    }

    fn read_byte(&mut self, address: u16) -> Result<u8, NvmError> {
        self.bytes
            .borrow()
            .get(address as usize)
            .copied()
            .ok_or(NvmError::AddressOutOfRange)
    }

    fn write_byte(&mut self, address: u16, data: u8) -> Result<(), NvmError> {
        if self.fail.get() {
            return Err(NvmError::WriteFailed);
        }
        let mut bytes = self.bytes.borrow_mut();
        let slot = bytes
            .get_mut(address as usize)
            .ok_or(NvmError::AddressOutOfRange)?;
        *slot = data;
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockConsole {
    text: Rc<RefCell<String>>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl TextSink for MockConsole {
    fn write_str(&mut self, s: &str) {
        self.text.borrow_mut().push_str(s);
    }
}

#[derive(Clone)]
pub struct MockAnalog {
    value: Rc<Cell<u16>>,
    max: u16,
}

impl MockAnalog {
    pub fn new(value: u16, max: u16) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
            max,
        }
    }

    pub fn set(&self, value: u16) {
        self.value.set(value);
    }
}

impl AnalogInput for MockAnalog {
    fn read(&mut self) -> u16 {
        self.value.get()
    }

    fn max_value(&self) -> u16 {
        self.max
    }
}

/// Records requested waits instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    waits_us: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits_us(&self) -> Vec<u32> {
        self.waits_us.clone()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(ns / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(ms.saturating_mul(1000));
    }
}

pub struct MockBoard;

impl Board for MockBoard {
    type Button = MockInput;
    type EdgeLine = MockEdgeLine;
    type DebounceTick = MockTick;
    type HeartbeatTick = MockTick;
    type FaultTimer = MockFaultTimer;
    type Store = MockStore;
    type Console = MockConsole;
    type Indicator = MockOutput;
    type PwmOutput = MockOutput;
    type Analog = MockAnalog;
}
