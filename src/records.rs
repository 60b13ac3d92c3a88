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

//! Object-record serialization (H/T/E) and listing-line formatting. All hex
//! output is uppercase and zero-padded to the field widths the loader
//! expects.

use crate::assembler::encoder::constants::MAX_TEXT_RECORD_BYTES;

/// An accumulating text record: a run address plus an ordered list of
/// entries, each `(byte length, value)`, flushed once it would exceed
/// [`MAX_TEXT_RECORD_BYTES`].
pub struct TextRecord {
    address: u32,
    byte_count: usize,
    entries: Vec<(u32, u32)>,
}

impl TextRecord {
    pub fn new(address: u32) -> Self {
        TextRecord {
            address,
            byte_count: 0,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.byte_count == 0
    }

    pub fn would_overflow(&self, additional_bytes: u32) -> bool {
        self.byte_count + additional_bytes as usize > MAX_TEXT_RECORD_BYTES
    }

    pub fn push(&mut self, size: u32, value: u32) {
        self.entries.push((size, value));
        self.byte_count += size as usize;
    }

    /// Serializes this record as `T` + record address + byte count +
    /// concatenated entry values, per the object-record format.
    pub fn format(&self) -> String {
        let mut body = String::new();
        for (size, value) in &self.entries {
            body.push_str(&format!("{:0width$X}", value, width = (size * 2) as usize));
        }
        format!("T{:06X}{:02X}{}", self.address, self.byte_count, body)
    }
}

/// `H` + program name (space-padded to 6 chars) + start address + size.
pub fn format_header(name: &str, start: u32, size: u32) -> String {
    let trimmed: String = name.chars().take(6).collect();
    format!("H{:<6}{:06X}{:06X}", trimmed, start, size)
}

/// `E` + entry-point address, with no trailing newline.
pub fn format_end(entry: u32) -> String {
    format!("E{:06X}", entry)
}

/// A non-instruction listing line: address, label, operation, operand.
pub fn format_listing_directive(address: u32, label: &str, operation: &str, operand: &str) -> String {
    format!("{:08X} {:<8} {:<8} {:<8}", address, label, operation, operand)
}

/// An instruction listing line: the directive line plus the object code,
/// uppercase hex zero-padded to `2 * nbytes` digits.
pub fn format_listing_instruction(
    address: u32,
    label: &str,
    operation: &str,
    operand: &str,
    code: u32,
    nbytes: u32,
) -> String {
    format!(
        "{} {:0width$X}",
        format_listing_directive(address, label, operation, operand),
        code,
        width = (nbytes * 2) as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_pads_short_name() {
        assert_eq!(format_header("PROG", 0x001000, 3), "HPROG  001000000003");
    }

    #[test]
    fn end_has_no_trailing_newline_in_its_own_text() {
        assert_eq!(format_end(0x001000), "E001000");
    }

    #[test]
    fn text_record_formats_single_entry() {
        let mut record = TextRecord::new(0x001000);
        record.push(3, 0x4F0000);
        assert_eq!(record.format(), "T001000034F0000");
    }

    #[test]
    fn text_record_flags_overflow_past_thirty_bytes() {
        let mut record = TextRecord::new(0);
        for _ in 0..10 {
            record.push(3, 0);
        }
        assert!(!record.would_overflow(0));
        assert!(record.would_overflow(1));
    }
}
