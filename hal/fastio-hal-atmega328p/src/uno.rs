//! Pin table for the Uno board family
//!
//! Pin values are built from the port register block address (bits 15..4)
//! and the bit position within the port registers (bits 3..0), so they can
//! be read directly in hexadecimal: `0x235` is bit 5 of the block at `0x23`
//! (PINB/DDRB/PORTB), i.e. PB5.

/// PD0 (RX)
pub const D0: u16 = 0x290;
/// PD1 (TX)
pub const D1: u16 = 0x291;
/// PD2 (INT0)
pub const D2: u16 = 0x292;
/// PD3 (INT1)
pub const D3: u16 = 0x293;
/// PD4
pub const D4: u16 = 0x294;
/// PD5
pub const D5: u16 = 0x295;
/// PD6
pub const D6: u16 = 0x296;
/// PD7
pub const D7: u16 = 0x297;
/// PB0
pub const D8: u16 = 0x230;
/// PB1
pub const D9: u16 = 0x231;
/// PB2 (SS)
pub const D10: u16 = 0x232;
/// PB3 (MOSI)
pub const D11: u16 = 0x233;
/// PB4 (MISO)
pub const D12: u16 = 0x234;
/// PB5 (SCK, on-board LED)
pub const D13: u16 = 0x235;
/// PC0 (A0)
pub const D14: u16 = 0x260;
/// PC1 (A1)
pub const D15: u16 = 0x261;
/// PC2 (A2)
pub const D16: u16 = 0x262;
/// PC3 (A3)
pub const D17: u16 = 0x263;
/// PC4 (A4, SDA)
pub const D18: u16 = 0x264;
/// PC5 (A5, SCL)
pub const D19: u16 = 0x265;
/// PC6 (RESET)
pub const D20: u16 = 0x266;
/// PC7
pub const D21: u16 = 0x267;

/// On-board LED
pub const LED_BUILTIN: u16 = D13;

/// Every pin on the board with its name
pub const PINS: [(&str, u16); 22] = [
    ("D0", D0),
    ("D1", D1),
    ("D2", D2),
    ("D3", D3),
    ("D4", D4),
    ("D5", D5),
    ("D6", D6),
    ("D7", D7),
    ("D8", D8),
    ("D9", D9),
    ("D10", D10),
    ("D11", D11),
    ("D12", D12),
    ("D13", D13),
    ("D14", D14),
    ("D15", D15),
    ("D16", D16),
    ("D17", D17),
    ("D18", D18),
    ("D19", D19),
    ("D20", D20),
    ("D21", D21),
];

/// Parse a pin name from a board configuration file
///
/// Supports formats:
/// - "D13" or "d13" -> 0x235
/// - "LED_BUILTIN" -> 0x235
///
/// Intended for build scripts; firmware code uses the constants directly.
pub fn parse_pin_name(s: &str) -> Option<u16> {
    let s = s.trim();

    if s == "LED_BUILTIN" {
        return Some(LED_BUILTIN);
    }

    let num_str = s.strip_prefix('D').or_else(|| s.strip_prefix('d'))?;
    let num: usize = num_str.parse().ok()?;

    PINS.get(num).map(|&(_, pin)| pin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::BLOCKS;

    #[test]
    fn test_pin_table_layout() {
        for (name, pin) in PINS {
            assert!(pin & 0xf <= 7, "{} has bit position {}", name, pin & 0xf);
            assert!(BLOCKS.contains(&(pin >> 4)), "{} has unknown block", name);
        }
    }

    #[test]
    fn test_pin_table_collision_free() {
        for (i, (a_name, a)) in PINS.iter().enumerate() {
            for (b_name, b) in PINS.iter().skip(i + 1) {
                assert_ne!(a, b, "{} and {} share a pin", a_name, b_name);
            }
        }
    }

    #[test]
    fn test_pin_table_names_match_index() {
        for (i, (name, _)) in PINS.iter().enumerate() {
            assert_eq!(name[1..].parse::<usize>().unwrap(), i);
        }
    }

    #[test]
    fn test_port_mapping() {
        // Digital 0-7 on port D, 8-13 on port B, 14-21 on port C
        assert_eq!(D0 >> 4, 0x29);
        assert_eq!(D7 & 0xf, 7);
        assert_eq!(D8 >> 4, 0x23);
        assert_eq!(D13 & 0xf, 5);
        assert_eq!(D14 >> 4, 0x26);
        assert_eq!(D21 & 0xf, 7);
    }

    #[test]
    fn test_parse_pin_name() {
        assert_eq!(parse_pin_name("D0"), Some(D0));
        assert_eq!(parse_pin_name("d13"), Some(D13));
        assert_eq!(parse_pin_name("  D21 "), Some(D21));
        assert_eq!(parse_pin_name("LED_BUILTIN"), Some(D13));

        assert_eq!(parse_pin_name("D22"), None);
        assert_eq!(parse_pin_name("A0"), None);
        assert_eq!(parse_pin_name("D"), None);
        assert_eq!(parse_pin_name("13"), None);
        assert_eq!(parse_pin_name("D-1"), None);
    }
}
