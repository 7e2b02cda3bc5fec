//! Pin identifier encoding
//!
//! A pin identifier is a 16-bit value with two packed fields:
//!
//! ```text
//!  15                         4 3       0
//! ┌────────────────────────────┬─────────┐
//! │ register block base address│   bit   │
//! └────────────────────────────┴─────────┘
//! ```
//!
//! The block at the base address holds three consecutive 8-bit registers:
//! input state (PIN), direction (DDR) and output data (PORT). The bit field
//! selects one of the eight pins controlled by the block.

use fastio_hal::board::block_exists;

/// Width of the bit position field
pub const BIT_FIELD_BITS: u32 = 4;

/// Largest valid bit position within a block
pub const MAX_BIT: u8 = 7;

const BIT_FIELD_MASK: u16 = (1 << BIT_FIELD_BITS) - 1;

/// Largest base address that fits above the bit field
pub const MAX_BASE: u16 = u16::MAX >> BIT_FIELD_BITS;

/// Packed pin identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinId(u16);

impl PinId {
    /// Wrap a raw identifier taken from a board pin table
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Pack a block base address and bit position
    ///
    /// `base` must not exceed [`MAX_BASE`] and `bit` must not exceed
    /// [`MAX_BIT`]; this is only checked in debug builds.
    pub const fn new(base: u16, bit: u8) -> Self {
        debug_assert!(base <= MAX_BASE);
        debug_assert!(bit <= MAX_BIT);
        Self((base << BIT_FIELD_BITS) | bit as u16)
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Base address of the register block
    pub const fn base(self) -> u16 {
        self.0 >> BIT_FIELD_BITS
    }

    /// Bit position within the block's registers
    pub const fn bit(self) -> u8 {
        (self.0 & BIT_FIELD_MASK) as u8
    }

    /// Single-bit mask selecting this pin in each block register
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }

    /// Register block controlling this pin
    pub const fn block(self) -> RegisterBlock {
        RegisterBlock::new(self.base())
    }

    /// Whether this identifier names a real pin on a board with `blocks`
    pub const fn is_valid_for(self, blocks: &[u16]) -> bool {
        self.bit() <= MAX_BIT && block_exists(blocks, self.base())
    }
}

impl From<u16> for PinId {
    fn from(raw: u16) -> Self {
        Self::from_raw(raw)
    }
}

impl From<PinId> for u16 {
    fn from(pin: PinId) -> Self {
        pin.raw()
    }
}

/// Hardware register block controlling up to eight pins
///
/// The software never owns the registers; it only derives their addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    base: u16,
}

impl RegisterBlock {
    /// Offset of the input state register (reads the line, write 1 toggles)
    pub const PIN_OFFSET: u16 = 0;
    /// Offset of the direction register (1 = output)
    pub const DDR_OFFSET: u16 = 1;
    /// Offset of the output data register (pull-up enable in input mode)
    pub const PORT_OFFSET: u16 = 2;

    /// Block at `base`
    pub const fn new(base: u16) -> Self {
        Self { base }
    }

    /// Base address
    pub const fn base(self) -> u16 {
        self.base
    }

    /// Address of the input state register
    pub const fn pin(self) -> u16 {
        self.base + Self::PIN_OFFSET
    }

    /// Address of the direction register
    pub const fn ddr(self) -> u16 {
        self.base + Self::DDR_OFFSET
    }

    /// Address of the output data register
    pub const fn port(self) -> u16 {
        self.base + Self::PORT_OFFSET
    }
}
