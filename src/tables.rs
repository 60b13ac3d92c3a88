/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Static directive and opcode dictionaries, plus BYTE literal parsing.

use crate::ast::{ByteLiteral, OpcodeDescriptor};
use crate::errors::AssemblyError;

/// The full SIC/XE instruction mnemonic set. Every entry is the format the
/// mnemonic is natively encoded in; a leading `+` on the source mnemonic
/// promotes any of these to Format 4 at lookup time.
const OPCODES: &[(&str, u8, u8)] = &[
    ("ADD", 0x18, 3),
    ("ADDF", 0x58, 3),
    ("ADDR", 0x90, 2),
    ("AND", 0x40, 3),
    ("CLEAR", 0xB4, 2),
    ("COMP", 0x28, 3),
    ("COMPF", 0x88, 3),
    ("COMPR", 0xA0, 2),
    ("DIV", 0x24, 3),
    ("DIVF", 0x64, 3),
    ("DIVR", 0x9C, 2),
    ("FIX", 0xC4, 3),
    ("FLOAT", 0xC0, 3),
    ("HIO", 0xF4, 1),
    ("J", 0x3C, 3),
    ("JEQ", 0x30, 3),
    ("JGT", 0x34, 3),
    ("JLT", 0x38, 3),
    ("JSUB", 0x48, 3),
    ("LDA", 0x00, 3),
    ("LDB", 0x68, 3),
    ("LDCH", 0x50, 3),
    ("LDF", 0x70, 3),
    ("LDL", 0x08, 3),
    ("LDS", 0x6C, 3),
    ("LDT", 0x74, 3),
    ("LDX", 0x04, 3),
    ("LPS", 0xD0, 3),
    ("MUL", 0x20, 3),
    ("MULF", 0x60, 3),
    ("MULR", 0x98, 2),
    ("NORM", 0xC8, 3),
    ("OR", 0x44, 3),
    ("RD", 0xD8, 3),
    ("RMO", 0xAC, 2),
    ("RSUB", 0x4C, 3),
    ("SHIFTL", 0xA4, 2),
    ("SHIFTR", 0xA8, 2),
    ("SIO", 0xF0, 1),
    ("SSK", 0xEC, 3),
    ("STA", 0x0C, 3),
    ("STB", 0x78, 3),
    ("STCH", 0x54, 3),
    ("STF", 0x80, 3),
    ("STI", 0xD4, 3),
    ("STL", 0x14, 3),
    ("STS", 0x7C, 3),
    ("STSW", 0xE8, 3),
    ("STT", 0x84, 3),
    ("STX", 0x10, 3),
    ("SUB", 0x1C, 3),
    ("SUBF", 0x5C, 3),
    ("SUBR", 0x94, 2),
    ("SVC", 0xB0, 2),
    ("TD", 0xE0, 3),
    ("TIO", 0xF8, 1),
    ("TIX", 0x2C, 3),
    ("TIXR", 0xB8, 2),
    ("WD", 0xDC, 3),
];

/// Looks up a mnemonic, stripping a leading `+` and reporting Format 4 for
/// the result when present.
pub fn lookup_opcode(mnemonic: &str) -> Option<OpcodeDescriptor> {
    let (base, extended) = match mnemonic.strip_prefix('+') {
        Some(rest) => (rest, true),
        None => (mnemonic, false),
    };
    OPCODES
        .iter()
        .find(|(name, _, _)| *name == base)
        .map(|(_, value, format)| OpcodeDescriptor {
            value: *value,
            format: if extended { 4 } else { *format },
        })
}

/// Parses a `BYTE` operand (`X'hh...h'` or `C'c1c2...cn'`) into its packed
/// integer value and byte length.
pub fn parse_byte_literal(operand: &str, line: usize) -> Result<ByteLiteral, AssemblyError> {
    if let Some(rest) = operand.strip_prefix("X'").and_then(|s| s.strip_suffix('\'')) {
        if rest.is_empty() || rest.len() % 2 != 0 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AssemblyError::OutOfRangeByte {
                line,
                literal: operand.to_string(),
            });
        }
        let value = i64::from_str_radix(rest, 16).map_err(|_| AssemblyError::OutOfRangeByte {
            line,
            literal: operand.to_string(),
        })?;
        return Ok(ByteLiteral {
            value,
            size: (rest.len() / 2) as u32,
        });
    }

    if let Some(rest) = operand.strip_prefix("C'").and_then(|s| s.strip_suffix('\'')) {
        if rest.is_empty() {
            return Err(AssemblyError::OutOfRangeByte {
                line,
                literal: operand.to_string(),
            });
        }
        let mut value: i64 = 0;
        for byte in rest.bytes() {
            value = (value << 8) | byte as i64;
        }
        return Ok(ByteLiteral {
            value,
            size: rest.len() as u32,
        });
    }

    Err(AssemblyError::OutOfRangeByte {
        line,
        literal: operand.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_plain_format3() {
        let d = lookup_opcode("LDA").unwrap();
        assert_eq!(d.value, 0x00);
        assert_eq!(d.format, 3);
    }

    #[test]
    fn extended_prefix_forces_format4() {
        let d = lookup_opcode("+JSUB").unwrap();
        assert_eq!(d.value, 0x48);
        assert_eq!(d.format, 4);
    }

    #[test]
    fn unknown_mnemonic_is_none() {
        assert!(lookup_opcode("NOPE").is_none());
    }

    #[test]
    fn hex_byte_literal_packs_single_byte() {
        let b = parse_byte_literal("X'F1'", 1).unwrap();
        assert_eq!(b.value, 0xF1);
        assert_eq!(b.size, 1);
    }

    #[test]
    fn hex_byte_literal_rejects_odd_digit_count() {
        assert!(parse_byte_literal("X'F'", 1).is_err());
    }

    #[test]
    fn char_literal_packs_ascii_codes() {
        let b = parse_byte_literal("C'EOF'", 1).unwrap();
        assert_eq!(b.size, 3);
        assert_eq!(b.value, 0x454F46);
    }
}
