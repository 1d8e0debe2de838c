//! Interrupt coordination
//!
//! [`Supervisor`] owns every peripheral handle and exposes one method per
//! interrupt vector. The firmware keeps it in a [`Shared`] cell and calls
//! those methods from its handlers; the main loop runs the PWM cycle.
//!
//! ```text
//!   edge ──► suppress input, arm debounce ──► (pressed) feed watchdog
//!   debounce tick ──► count ──► (elapsed) stop debounce, re-arm input
//!   heartbeat tick ──► count ──► (period) toggle indicator
//!   watchdog timeout ──► count fault ──► (limit) lockdown:
//!        clear input, retire debounce, disable PWM, start heartbeat
//! ```

use embedded_hal::delay::DelayNs;
use tripwire_hal::{
    AnalogInput, ByteStore, EdgeInterrupt, FaultTimer, InputPin, NvmError, OutputPin, TextSink,
    TickSource,
};

use crate::config::{ConfigError, SupervisorConfig};
use crate::fault::{FaultState, TimeoutOutcome, WatchdogFaultController};
use crate::input::{EdgeInput, InputState};
use crate::pwm::{PwmTiming, SoftPwm};
use crate::shared::Shared;
use crate::timer::{DebounceTimer, HeartbeatTimer};

/// Peripheral types of a concrete board
pub trait Board {
    type Button: InputPin;
    type EdgeLine: EdgeInterrupt;
    type DebounceTick: TickSource;
    type HeartbeatTick: TickSource;
    type FaultTimer: FaultTimer;
    type Store: ByteStore;
    type Console: TextSink;
    /// Toggled by the heartbeat after lockdown
    type Indicator: OutputPin;
    /// Driven by the software PWM
    type PwmOutput: OutputPin;
    type Analog: AnalogInput;
}

/// Peripheral handles handed to [`Supervisor::new`]
pub struct Peripherals<B: Board> {
    pub button: B::Button,
    /// Board pin number of the button
    pub button_id: u8,
    /// Button pulls the pin low when pressed
    pub button_active_low: bool,
    pub edge_line: B::EdgeLine,
    pub debounce_tick: B::DebounceTick,
    pub heartbeat_tick: B::HeartbeatTick,
    pub fault_timer: B::FaultTimer,
    pub store: B::Store,
    pub console: B::Console,
    pub indicator: B::Indicator,
    pub pwm_output: B::PwmOutput,
    pub analog: B::Analog,
}

/// What an edge interrupt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Input was not armed (suppressed or cleared)
    Ignored,
    /// Debounce window started, button reads released
    Released,
    /// Debounce window started and the watchdog was acknowledged
    Pressed,
}

/// Snapshot of the coordination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupervisorStatus {
    pub input: InputState,
    pub fault: FaultState,
    pub timeout_count: u8,
    pub debounce_running: bool,
    pub heartbeat_running: bool,
    pub pwm_enabled: bool,
}

/// Owner of all interrupt-shared state
pub struct Supervisor<B: Board> {
    input: EdgeInput<B::Button, B::EdgeLine>,
    debounce: DebounceTimer<B::DebounceTick>,
    heartbeat: HeartbeatTimer<B::HeartbeatTick>,
    fault: WatchdogFaultController<B::FaultTimer, B::Store>,
    pwm: SoftPwm<B::PwmOutput, B::Analog>,
    indicator: B::Indicator,
    console: B::Console,
}

impl<B: Board> Supervisor<B> {
    /// Validate `config` and take ownership of the peripherals
    ///
    /// Nothing is enabled until [`start`](Self::start).
    pub fn new(p: Peripherals<B>, config: &SupervisorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let fault = WatchdogFaultController::new(p.fault_timer, p.store, config.fault)?;

        Ok(Self {
            input: EdgeInput::new(p.button, p.edge_line, p.button_id, p.button_active_low),
            debounce: DebounceTimer::new(p.debounce_tick, config.debounce.duration_ms),
            heartbeat: HeartbeatTimer::new(p.heartbeat_tick, config.heartbeat.duration_ms),
            fault,
            pwm: SoftPwm::new(p.pwm_output, p.analog, config.pwm.period_us),
            indicator: p.indicator,
            console: p.console,
        })
    }

    /// Arm the input, load the fault counter and start the fault timer
    ///
    /// A stored count already at the limit locks down before returning.
    pub fn start(&mut self) -> Result<FaultState, NvmError> {
        self.input.enable_interrupt();
        let booted = self.fault.boot();

        if self.fault.is_lockdown() {
            self.console.emit_line("System lockdown!");
            shut_down::<B>(
                &mut self.input,
                &mut self.debounce,
                &mut self.pwm,
                &mut self.indicator,
                &mut self.heartbeat,
            );
        }

        booted
    }

    /// Edge interrupt on the button
    pub fn on_edge(&mut self) -> EdgeOutcome {
        if !self.input.suppress() {
            return EdgeOutcome::Ignored;
        }
        self.debounce.arm();

        if self.input.is_pressed() {
            self.fault.reset();
            self.console.emit_line("Watchdog timer reset!");
            EdgeOutcome::Pressed
        } else {
            EdgeOutcome::Released
        }
    }

    /// Debounce timer tick
    ///
    /// Returns true when the window elapsed and the input was re-armed.
    pub fn on_debounce_tick(&mut self) -> bool {
        self.debounce.count();
        if !self.debounce.elapsed() {
            return false;
        }
        self.debounce.clear();
        self.input.release()
    }

    /// Heartbeat timer tick
    ///
    /// Returns true when the indicator was toggled.
    pub fn on_heartbeat_tick(&mut self) -> bool {
        if self.heartbeat.count() {
            self.indicator.toggle();
            true
        } else {
            false
        }
    }

    /// Watchdog timeout interrupt
    pub fn on_watchdog_timeout(&mut self) -> Result<TimeoutOutcome, NvmError> {
        let Self {
            input,
            debounce,
            heartbeat,
            fault,
            pwm,
            indicator,
            console,
        } = self;

        fault.on_timeout(console, || {
            shut_down::<B>(input, debounce, pwm, indicator, heartbeat)
        })
    }

    /// Acknowledge the watchdog from program code
    pub fn acknowledge(&mut self) {
        self.fault.reset();
    }

    /// Zero the persisted fault counter
    pub fn clear_fault_record(&mut self) -> Result<(), NvmError> {
        self.fault.clear_record()
    }

    /// Start a PWM cycle from the analog input
    pub fn begin_pwm_pulse(&mut self) -> Option<PwmTiming> {
        self.pwm.begin_pulse()
    }

    /// Start a PWM cycle at an explicit duty fraction
    pub fn begin_pwm_pulse_with_duty(&mut self, duty: f32) -> Option<PwmTiming> {
        self.pwm.begin_pulse_with_duty(duty)
    }

    /// End the high phase of the current PWM cycle
    pub fn end_pwm_pulse(&mut self) {
        self.pwm.end_pulse();
    }

    pub fn is_lockdown(&self) -> bool {
        self.fault.is_lockdown()
    }

    pub fn pwm_enabled(&self) -> bool {
        self.pwm.is_enabled()
    }

    pub fn status(&self) -> SupervisorStatus {
        SupervisorStatus {
            input: self.input.state(),
            fault: self.fault.state(),
            timeout_count: self.fault.count(),
            debounce_running: self.debounce.is_running(),
            heartbeat_running: self.heartbeat.is_running(),
            pwm_enabled: self.pwm.is_enabled(),
        }
    }

    /// Console for reports outside the handlers
    pub fn console(&mut self) -> &mut B::Console {
        &mut self.console
    }
}

/// Lockdown: deactivate everything but the heartbeat indicator
fn shut_down<B: Board>(
    input: &mut EdgeInput<B::Button, B::EdgeLine>,
    debounce: &mut DebounceTimer<B::DebounceTick>,
    pwm: &mut SoftPwm<B::PwmOutput, B::Analog>,
    indicator: &mut B::Indicator,
    heartbeat: &mut HeartbeatTimer<B::HeartbeatTick>,
) {
    input.clear();
    debounce.shutdown();
    pwm.disable();
    indicator.set_low();
    heartbeat.start();
}

impl<B: Board> Shared<Supervisor<B>> {
    /// One blocking PWM cycle from the analog input
    ///
    /// Output transitions happen inside critical sections, the waits
    /// outside them, so handlers keep running during the cycle. Returns
    /// false without waiting when the cell is empty or PWM is disabled.
    pub fn run_pwm<D: DelayNs>(&self, delay: &mut D) -> bool {
        let Some(timing) = self.with(|s| s.begin_pwm_pulse()).flatten() else {
            return false;
        };
        self.finish_pwm(timing, delay);
        true
    }

    /// One blocking PWM cycle at an explicit duty fraction
    ///
    /// No-op when `duty` lies outside `[0, 1]`.
    pub fn run_pwm_with_duty_cycle<D: DelayNs>(&self, duty: f32, delay: &mut D) -> bool {
        let Some(timing) = self.with(|s| s.begin_pwm_pulse_with_duty(duty)).flatten() else {
            return false;
        };
        self.finish_pwm(timing, delay);
        true
    }

    fn finish_pwm<D: DelayNs>(&self, timing: PwmTiming, delay: &mut D) {
        delay.delay_us(timing.on_us);
        self.with(|s| s.end_pwm_pulse());
        delay.delay_us(timing.off_us);
    }
}
