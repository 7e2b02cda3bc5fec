//! Host-side register simulator
//!
//! [`SimBoard`] models the three GPIO ports of an ATmega328P at 16 MHz so
//! pin code can run in host tests. State is thread-local, which keeps
//! parallel tests apart; call [`reset`] at the start of each test.
//!
//! The model follows the AVR port hardware:
//!
//! - DDR bit set: the line carries the PORT bit
//! - DDR bit clear: the line carries an externally driven level if one is
//!   set with [`drive`], otherwise the pull-up (PORT bit), otherwise low
//! - Writing ones to PIN toggles the matching PORT bits
//!
//! Every register access, interrupt change and busy-wait is recorded as a
//! [`SimEvent`].

use std::cell::{Cell, RefCell};
use std::vec::Vec;

use fastio_hal::{Board, BusyWait, InterruptControl, Millis, RegisterSpace};

use crate::pin::{PinId, RegisterBlock};

/// Simulated register blocks (ports B, C and D)
pub const SIM_BLOCKS: [u16; 3] = [0x23, 0x26, 0x29];

/// Something the simulated hardware observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Register read
    Read { addr: u16, value: u8 },
    /// Register write
    Write { addr: u16, value: u8 },
    /// Interrupts disabled
    InterruptsDisabled,
    /// Interrupts enabled
    InterruptsEnabled,
    /// Busy-wait loop with the given count
    Spin(u16),
}

#[derive(Debug, Default, Clone, Copy)]
struct Port {
    ddr: u8,
    port: u8,
    /// Bits with an external driver attached
    driven: u8,
    /// Level applied by the external drivers
    level: u8,
}

impl Port {
    fn line(&self) -> u8 {
        let output = self.port & self.ddr;
        let external = self.level & self.driven;
        let pullup = self.port & !self.driven;
        output | (!self.ddr & (external | pullup))
    }
}

struct SimState {
    ports: [Port; 3],
    interrupts_enabled: bool,
    events: Vec<SimEvent>,
}

impl SimState {
    fn new() -> Self {
        Self {
            ports: [Port::default(); 3],
            interrupts_enabled: true,
            events: Vec::new(),
        }
    }

    fn locate(addr: u16) -> (usize, u16) {
        SIM_BLOCKS
            .iter()
            .position(|&base| (base..base + 3).contains(&addr))
            .map(|i| (i, addr - SIM_BLOCKS[i]))
            .unwrap_or_else(|| panic!("access to unmapped register {:#x}", addr))
    }

    fn peek(&self, addr: u16) -> u8 {
        let (i, offset) = Self::locate(addr);
        let port = &self.ports[i];
        match offset {
            RegisterBlock::PIN_OFFSET => port.line(),
            RegisterBlock::DDR_OFFSET => port.ddr,
            _ => port.port,
        }
    }

    fn poke(&mut self, addr: u16, value: u8) {
        let (i, offset) = Self::locate(addr);
        let port = &mut self.ports[i];
        match offset {
            RegisterBlock::PIN_OFFSET => port.port ^= value,
            RegisterBlock::DDR_OFFSET => port.ddr = value,
            _ => port.port = value,
        }
    }
}

std::thread_local! {
    static STATE: RefCell<SimState> = RefCell::new(SimState::new());
}

fn with_state<R>(f: impl FnOnce(&mut SimState) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Clear all registers, external drivers and events; enable interrupts
pub fn reset() {
    with_state(|state| *state = SimState::new());
}

/// Events recorded since the last [`reset`] or [`clear_events`]
pub fn events() -> Vec<SimEvent> {
    with_state(|state| state.events.clone())
}

/// Forget recorded events
pub fn clear_events() {
    with_state(|state| state.events.clear());
}

/// Read a register without recording an event
pub fn peek(addr: u16) -> u8 {
    with_state(|state| state.peek(addr))
}

/// Write a register without recording an event
pub fn poke(addr: u16, value: u8) {
    with_state(|state| state.poke(addr, value));
}

/// Attach an external driver holding `pin` at `level`
pub fn drive(pin: PinId, level: bool) {
    with_state(|state| {
        let (i, _) = SimState::locate(pin.base());
        let port = &mut state.ports[i];
        port.driven |= pin.mask();
        if level {
            port.level |= pin.mask();
        } else {
            port.level &= !pin.mask();
        }
    });
}

/// Detach the external driver from `pin`
pub fn release(pin: PinId) {
    with_state(|state| {
        let (i, _) = SimState::locate(pin.base());
        state.ports[i].driven &= !pin.mask();
    });
}

/// Current state of the simulated interrupt flag
pub fn interrupts_enabled() -> bool {
    with_state(|state| state.interrupts_enabled)
}

/// Simulated register file
pub struct SimRegisters;

impl RegisterSpace for SimRegisters {
    unsafe fn read(addr: u16) -> u8 {
        with_state(|state| {
            let value = state.peek(addr);
            state.events.push(SimEvent::Read { addr, value });
            value
        })
    }

    unsafe fn write(addr: u16, value: u8) {
        with_state(|state| {
            state.poke(addr, value);
            state.events.push(SimEvent::Write { addr, value });
        });
    }
}

/// Simulated interrupt flag
pub struct SimInterrupts;

impl InterruptControl for SimInterrupts {
    fn disable() {
        with_state(|state| {
            state.interrupts_enabled = false;
            state.events.push(SimEvent::InterruptsDisabled);
        });
    }

    unsafe fn enable() {
        with_state(|state| {
            state.interrupts_enabled = true;
            state.events.push(SimEvent::InterruptsEnabled);
        });
    }
}

/// Simulated delay loop; records the count instead of spinning
pub struct SimDelay;

impl BusyWait for SimDelay {
    const CYCLES_PER_LOOP: u32 = 4;

    fn spin(count: u16) {
        with_state(|state| state.events.push(SimEvent::Spin(count)));
    }
}

/// Simulated ATmega328P board at 16 MHz
pub struct SimBoard;

impl Board for SimBoard {
    const F_CPU: u32 = 16_000_000;
    const BLOCKS: &'static [u16] = &SIM_BLOCKS;

    type Registers = SimRegisters;
    type Interrupts = SimInterrupts;
    type Delay = SimDelay;
}

/// Manually advanced millisecond clock
#[derive(Debug, Default)]
pub struct SimClock {
    now: Cell<u32>,
}

impl SimClock {
    /// Clock at `start` milliseconds
    pub fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to `ms`
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    /// Move forward by `ms`, wrapping at `u32::MAX`
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Millis for SimClock {
    fn millis(&self) -> u32 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_write_toggles_port() {
        reset();
        poke(0x25, 0b0000_0011);
        poke(0x23, 0b0000_0110);
        assert_eq!(peek(0x25), 0b0000_0101);
    }

    #[test]
    fn test_line_model() {
        reset();
        let pin = PinId::new(0x29, 3);

        // Floating input reads low
        assert_eq!(peek(0x29) & pin.mask(), 0);

        // Pull-up
        poke(0x2b, pin.mask());
        assert_eq!(peek(0x29) & pin.mask(), pin.mask());

        // External driver overrides the pull-up
        drive(pin, false);
        assert_eq!(peek(0x29) & pin.mask(), 0);

        // Output mode drives the line from PORT
        poke(0x2a, pin.mask());
        assert_eq!(peek(0x29) & pin.mask(), pin.mask());
    }

    #[test]
    #[should_panic(expected = "unmapped register")]
    fn test_unmapped_register_panics() {
        reset();
        peek(0x40);
    }

    #[test]
    fn test_clock_wraps() {
        let clock = SimClock::new(u32::MAX);
        clock.advance(2);
        assert_eq!(clock.millis(), 1);
    }
}
