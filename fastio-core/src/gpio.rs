//! Register-level GPIO access
//!
//! [`Gpio`] is a zero-sized handle whose pin identity is a const generic.
//! Register addresses and the bit mask are associated constants, so every
//! operation compiles to a direct access of a fixed address with no table
//! lookup or branch on the pin.

use core::convert::Infallible;
use core::marker::PhantomData;

use fastio_hal::{Board, BusyWait, RegisterSpace};

use crate::critical::without_interrupts;
use crate::pin::PinId;

/// Digital I/O pin `PIN` on board `B`
///
/// `PIN` is a packed identifier from the board's pin table (see
/// [`PinId`]). Identifiers whose bit position exceeds 7, or whose base
/// address is not one of `B::BLOCKS`, are rejected when the type is
/// instantiated; there is no runtime check.
///
/// Two handles for the same `PIN` alias the same hardware bits. Keeping
/// them apart is up to the caller.
pub struct Gpio<B, const PIN: u16> {
    _board: PhantomData<B>,
}

impl<B: Board, const PIN: u16> Gpio<B, PIN> {
    /// Decoded identifier
    pub const ID: PinId = PinId::from_raw(PIN);

    const VALID: () = assert!(
        Self::ID.is_valid_for(B::BLOCKS),
        "pin identifier does not name a pin on this board"
    );

    const MASK: u8 = Self::ID.mask();
    const PIN_REG: u16 = Self::ID.block().pin();
    const DDR_REG: u16 = Self::ID.block().ddr();
    const PORT_REG: u16 = Self::ID.block().port();

    /// Create a handle for the pin
    ///
    /// Does not touch the hardware; the pin keeps its current mode.
    ///
    /// ```
    /// # use fastio_core::Gpio;
    /// # use fastio_hal::{Board, BusyWait, InterruptControl, RegisterSpace};
    /// # struct PortB;
    /// # impl RegisterSpace for PortB {
    /// #     unsafe fn read(_: u16) -> u8 { 0 }
    /// #     unsafe fn write(_: u16, _: u8) {}
    /// # }
    /// # impl InterruptControl for PortB {
    /// #     fn disable() {}
    /// #     unsafe fn enable() {}
    /// # }
    /// # impl BusyWait for PortB {
    /// #     const CYCLES_PER_LOOP: u32 = 4;
    /// #     fn spin(_: u16) {}
    /// # }
    /// # impl Board for PortB {
    /// #     const F_CPU: u32 = 16_000_000;
    /// #     const BLOCKS: &'static [u16] = &[0x23];
    /// #     type Registers = PortB;
    /// #     type Interrupts = PortB;
    /// #     type Delay = PortB;
    /// # }
    /// // Bit 5 of the block at 0x23
    /// const LED: Gpio<PortB, 0x235> = Gpio::new();
    /// ```
    ///
    /// A bit position above 7 does not compile:
    ///
    /// ```compile_fail,E0080
    /// # use fastio_core::Gpio;
    /// # use fastio_hal::{Board, BusyWait, InterruptControl, RegisterSpace};
    /// # struct PortB;
    /// # impl RegisterSpace for PortB {
    /// #     unsafe fn read(_: u16) -> u8 { 0 }
    /// #     unsafe fn write(_: u16, _: u8) {}
    /// # }
    /// # impl InterruptControl for PortB {
    /// #     fn disable() {}
    /// #     unsafe fn enable() {}
    /// # }
    /// # impl BusyWait for PortB {
    /// #     const CYCLES_PER_LOOP: u32 = 4;
    /// #     fn spin(_: u16) {}
    /// # }
    /// # impl Board for PortB {
    /// #     const F_CPU: u32 = 16_000_000;
    /// #     const BLOCKS: &'static [u16] = &[0x23];
    /// #     type Registers = PortB;
    /// #     type Interrupts = PortB;
    /// #     type Delay = PortB;
    /// # }
    /// const BAD_BIT: Gpio<PortB, 0x238> = Gpio::new();
    /// ```
    ///
    /// Neither does a base address that is not a register block of the board:
    ///
    /// ```compile_fail,E0080
    /// # use fastio_core::Gpio;
    /// # use fastio_hal::{Board, BusyWait, InterruptControl, RegisterSpace};
    /// # struct PortB;
    /// # impl RegisterSpace for PortB {
    /// #     unsafe fn read(_: u16) -> u8 { 0 }
    /// #     unsafe fn write(_: u16, _: u8) {}
    /// # }
    /// # impl InterruptControl for PortB {
    /// #     fn disable() {}
    /// #     unsafe fn enable() {}
    /// # }
    /// # impl BusyWait for PortB {
    /// #     const CYCLES_PER_LOOP: u32 = 4;
    /// #     fn spin(_: u16) {}
    /// # }
    /// # impl Board for PortB {
    /// #     const F_CPU: u32 = 16_000_000;
    /// #     const BLOCKS: &'static [u16] = &[0x23];
    /// #     type Registers = PortB;
    /// #     type Interrupts = PortB;
    /// #     type Delay = PortB;
    /// # }
    /// const NO_BLOCK: Gpio<PortB, 0x295> = Gpio::new();
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        // Evaluated once per instantiated pin, at compile time
        let () = Self::VALID;
        Self {
            _board: PhantomData,
        }
    }

    /// Set pin to high-impedance input mode
    #[inline(always)]
    pub fn input(&mut self) {
        // SAFETY: VALID ensures DDR_REG belongs to a register block of B
        unsafe { B::Registers::modify(Self::DDR_REG, |ddr| ddr & !Self::MASK) }
    }

    /// Set pin to input mode and enable the internal pull-up
    ///
    /// The pin idles high unless pulled to ground externally.
    #[inline(always)]
    pub fn input_pullup(&mut self) {
        self.input();
        self.high();
    }

    /// Set pin to output mode
    ///
    /// The line is driven from the output register bit.
    #[inline(always)]
    pub fn output(&mut self) {
        // SAFETY: VALID ensures DDR_REG belongs to a register block of B
        unsafe { B::Registers::modify(Self::DDR_REG, |ddr| ddr | Self::MASK) }
    }

    /// Read the physical pin state
    ///
    /// Valid in both modes; in output mode this reads back the driven level.
    #[inline(always)]
    pub fn read(&self) -> bool {
        // SAFETY: VALID ensures PIN_REG belongs to a register block of B
        unsafe { B::Registers::read(Self::PIN_REG) & Self::MASK != 0 }
    }

    /// Read the output register bit (driven level, or pull-up enable)
    #[inline(always)]
    pub fn is_set_high(&self) -> bool {
        // SAFETY: VALID ensures PORT_REG belongs to a register block of B
        unsafe { B::Registers::read(Self::PORT_REG) & Self::MASK != 0 }
    }

    /// Set pin low(0)
    #[inline(always)]
    pub fn low(&mut self) {
        // SAFETY: VALID ensures PORT_REG belongs to a register block of B
        unsafe { B::Registers::modify(Self::PORT_REG, |port| port & !Self::MASK) }
    }

    /// Set pin high(1)
    #[inline(always)]
    pub fn high(&mut self) {
        // SAFETY: VALID ensures PORT_REG belongs to a register block of B
        unsafe { B::Registers::modify(Self::PORT_REG, |port| port | Self::MASK) }
    }

    /// Toggle the output register bit
    ///
    /// Writing a one to the input state register flips the output bit in
    /// hardware, so this is a single write rather than read-modify-write.
    #[inline(always)]
    pub fn toggle(&mut self) {
        // SAFETY: VALID ensures PIN_REG belongs to a register block of B;
        // zero bits written to PIN have no effect
        unsafe { B::Registers::write(Self::PIN_REG, Self::MASK) }
    }

    /// Set pin to the given state
    ///
    /// Zero sets the pin low(0), any other value sets it high(1).
    #[inline(always)]
    pub fn write(&mut self, value: impl Into<u8>) {
        if value.into() != 0 {
            self.high();
        } else {
            self.low();
        }
    }

    /// Generate a pulse of `width_us` microseconds
    ///
    /// Toggles the pin, busy-waits a cycle-counted loop and toggles back,
    /// all with interrupts disabled so the width is accurate to a few CPU
    /// cycles. A width of zero does nothing. Widths longer than the delay
    /// loop can count are clamped.
    ///
    /// Interrupts are enabled unconditionally afterwards. Calling this from
    /// an interrupt handler or another interrupt-disabled region re-enables
    /// interrupts early.
    #[inline(always)]
    pub fn pulse(&mut self, width_us: u16) {
        if width_us == 0 {
            return;
        }
        let count = pulse_loop_count(
            width_us,
            B::F_CPU,
            <B::Delay as BusyWait>::CYCLES_PER_LOOP,
        );
        without_interrupts::<B::Interrupts, _>(|| {
            self.toggle();
            B::Delay::spin(count);
            self.toggle();
        });
    }
}

impl<B: Board, const PIN: u16> Default for Gpio<B, PIN> {
    fn default() -> Self {
        Self::new()
    }
}

/// Busy-wait iterations for a pulse of `width_us` microseconds
///
/// Computed in 32 bits and clamped to what the 16-bit loop counter holds.
pub const fn pulse_loop_count(width_us: u16, f_cpu: u32, cycles_per_loop: u32) -> u16 {
    let cycles = width_us as u32 * (f_cpu / 1_000_000);
    let count = cycles / cycles_per_loop;
    if count > u16::MAX as u32 {
        u16::MAX
    } else {
        count as u16
    }
}

impl<B: Board, const PIN: u16> fastio_hal::OutputPin for Gpio<B, PIN> {
    fn set_high(&mut self) {
        Self::high(self)
    }

    fn set_low(&mut self) {
        Self::low(self)
    }

    fn toggle(&mut self) {
        Self::toggle(self)
    }

    fn is_set_high(&self) -> bool {
        Self::is_set_high(self)
    }
}

impl<B: Board, const PIN: u16> fastio_hal::InputPin for Gpio<B, PIN> {
    fn is_high(&self) -> bool {
        Self::read(self)
    }
}

impl<B: Board, const PIN: u16> fastio_hal::DirectionPin for Gpio<B, PIN> {
    fn set_input(&mut self) {
        Self::input(self)
    }

    fn set_input_pullup(&mut self) {
        Self::input_pullup(self)
    }

    fn set_output(&mut self) {
        Self::output(self)
    }
}

impl<B: Board, const PIN: u16> embedded_hal::digital::ErrorType for Gpio<B, PIN> {
    type Error = Infallible;
}

impl<B: Board, const PIN: u16> embedded_hal::digital::InputPin for Gpio<B, PIN> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::read(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!Self::read(self))
    }
}

impl<B: Board, const PIN: u16> embedded_hal::digital::OutputPin for Gpio<B, PIN> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Self::low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Self::high(self);
        Ok(())
    }
}

impl<B: Board, const PIN: u16> embedded_hal::digital::StatefulOutputPin for Gpio<B, PIN> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!Self::is_set_high(self))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Self::toggle(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{self, SimBoard, SimEvent};
    use proptest::prelude::*;

    /// PB5 on the simulated board
    type Led = Gpio<SimBoard, 0x235>;
    /// PD2 on the simulated board
    type Switch = Gpio<SimBoard, 0x292>;

    const PINB: u16 = 0x23;
    const DDRB: u16 = 0x24;
    const PORTB: u16 = 0x25;

    #[test]
    fn test_output_write_read_back() {
        sim::reset();
        let mut led = Led::new();
        led.output();

        led.high();
        assert!(led.read());
        assert!(led.is_set_high());

        led.low();
        assert!(!led.read());
        assert!(!led.is_set_high());
    }

    #[test]
    fn test_only_own_bit_changes() {
        sim::reset();
        sim::poke(DDRB, 0b0000_0001);
        sim::poke(PORTB, 0b1000_0001);

        let mut led = Led::new();
        led.output();
        led.high();

        assert_eq!(sim::peek(DDRB), 0b0010_0001);
        assert_eq!(sim::peek(PORTB), 0b1010_0001);

        led.low();
        led.input();
        assert_eq!(sim::peek(DDRB), 0b0000_0001);
        assert_eq!(sim::peek(PORTB), 0b1000_0001);
    }

    #[test]
    fn test_toggle_is_single_write() {
        sim::reset();
        let mut led = Led::new();
        led.output();
        sim::clear_events();

        led.toggle();

        assert_eq!(
            sim::events(),
            [SimEvent::Write {
                addr: PINB,
                value: 0b0010_0000
            }]
        );
        assert!(led.read());
    }

    #[test]
    fn test_double_toggle_restores() {
        sim::reset();
        let mut led = Led::new();
        led.output();

        for start in [false, true] {
            led.write(start);
            led.toggle();
            assert_eq!(led.read(), !start);
            led.toggle();
            assert_eq!(led.read(), start);
        }
    }

    #[test]
    fn test_write_values() {
        sim::reset();
        let mut led = Led::new();
        led.output();

        led.write(1u8);
        assert!(led.read());
        led.write(0u8);
        assert!(!led.read());
        led.write(0x80u8);
        assert!(led.read());
        led.write(false);
        assert!(!led.read());
        led.write(true);
        assert!(led.read());
    }

    #[test]
    fn test_input_idempotent() {
        sim::reset();
        let mut led = Led::new();
        led.output();

        led.input();
        let once = (sim::peek(DDRB), sim::peek(PORTB));
        led.input();
        assert_eq!((sim::peek(DDRB), sim::peek(PORTB)), once);
        assert_eq!(once.0 & 0b0010_0000, 0);
    }

    #[test]
    fn test_output_idempotent() {
        sim::reset();
        let mut led = Led::new();

        led.output();
        let once = (sim::peek(DDRB), sim::peek(PORTB));
        led.output();
        assert_eq!((sim::peek(DDRB), sim::peek(PORTB)), once);
        assert_eq!(once.0, 0b0010_0000);
    }

    #[test]
    fn test_input_pullup_idles_high() {
        sim::reset();
        let mut switch = Switch::new();
        switch.input_pullup();

        assert!(switch.read());

        sim::drive(Switch::ID, false);
        assert!(!switch.read());

        sim::release(Switch::ID);
        assert!(switch.read());
    }

    #[test]
    fn test_floating_input_follows_line() {
        sim::reset();
        let mut switch = Switch::new();
        switch.input();

        assert!(!switch.read());
        sim::drive(Switch::ID, true);
        assert!(switch.read());
    }

    #[test]
    fn test_pulse_sequence() {
        sim::reset();
        let mut led = Led::new();
        led.output();
        led.low();
        sim::clear_events();

        led.pulse(100);

        // 100 us at 16 MHz = 1600 cycles = 400 loops of 4 cycles
        assert_eq!(
            sim::events(),
            [
                SimEvent::InterruptsDisabled,
                SimEvent::Write {
                    addr: PINB,
                    value: 0b0010_0000
                },
                SimEvent::Spin(400),
                SimEvent::Write {
                    addr: PINB,
                    value: 0b0010_0000
                },
                SimEvent::InterruptsEnabled,
            ]
        );
        assert!(!led.read());
        assert!(sim::interrupts_enabled());
    }

    #[test]
    fn test_pulse_idle_high_is_low_pulse() {
        sim::reset();
        let mut led = Led::new();
        led.output();
        led.high();

        led.pulse(10);
        assert!(led.read());
    }

    #[test]
    fn test_pulse_zero_is_noop() {
        sim::reset();
        let mut led = Led::new();
        led.output();
        sim::clear_events();

        led.pulse(0);
        assert!(sim::events().is_empty());
    }

    #[test]
    fn test_pulse_loop_count() {
        assert_eq!(pulse_loop_count(100, 16_000_000, 4), 400);
        assert_eq!(pulse_loop_count(1, 16_000_000, 4), 4);
        assert_eq!(pulse_loop_count(100, 8_000_000, 4), 200);
        // Below one loop
        assert_eq!(pulse_loop_count(3, 1_000_000, 4), 0);
        // Clamped to the 16-bit counter
        assert_eq!(pulse_loop_count(u16::MAX, 16_000_000, 4), u16::MAX);
        assert_eq!(pulse_loop_count(16_383, 16_000_000, 4), 65_532);
    }

    #[test]
    fn test_hal_traits() {
        use fastio_hal::{DirectionPin, InputPin, OutputPin};

        fn blink<P: OutputPin + DirectionPin>(pin: &mut P) {
            pin.set_output();
            pin.set_state(true);
            pin.toggle();
        }

        sim::reset();
        let mut led = Led::new();
        blink(&mut led);
        assert!(led.is_set_low());
        assert!(InputPin::is_low(&led));
    }

    #[test]
    fn test_embedded_hal_traits() {
        use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

        fn drive<P: OutputPin + StatefulOutputPin + InputPin>(pin: &mut P) -> bool {
            pin.set_high().unwrap();
            pin.toggle().unwrap();
            pin.is_set_low().unwrap() && pin.is_low().unwrap()
        }

        sim::reset();
        let mut led = Led::new();
        led.output();
        assert!(drive(&mut led));
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        High,
        Low,
        Toggle,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::High), Just(Op::Low), Just(Op::Toggle)]
    }

    proptest! {
        #[test]
        fn prop_read_reflects_last_write(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            sim::reset();
            let mut led = Led::new();
            led.output();

            let mut expected = false;
            for op in ops {
                match op {
                    Op::High => { led.high(); expected = true; }
                    Op::Low => { led.low(); expected = false; }
                    Op::Toggle => { led.toggle(); expected = !expected; }
                }
                prop_assert_eq!(led.read(), expected);
            }
        }
    }
}
