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

//! Splits a fixed-column source line into label/operation/operand fields.

use crate::ast::Segment;
use crate::errors::AssemblyError;

/// Shared column-layout constant. Label occupies columns `1..FIELD_WIDTH`,
/// operation occupies the next `FIELD_WIDTH - 1` columns, and the operand
/// takes the rest of the line.
pub const FIELD_WIDTH: usize = 9;
const OPERATION_WIDTH: usize = FIELD_WIDTH - 1;

/// Splits one line into a `Segment`. Returns `Ok(None)` for a comment line
/// (leading `#`), fails with `BlankRecord` for a line starting with a
/// control byte.
pub fn segment_line(line: &str, line_number: usize) -> Result<Option<Segment>, AssemblyError> {
    if line.is_empty() {
        return Err(AssemblyError::BlankRecord(line_number));
    }

    let first = line.as_bytes()[0];
    if first == b'#' {
        return Ok(None);
    }
    if first < 32 {
        return Err(AssemblyError::BlankRecord(line_number));
    }

    let chars: Vec<char> = line.chars().collect();
    let label_end = FIELD_WIDTH.min(chars.len());
    let operation_end = (FIELD_WIDTH + OPERATION_WIDTH).min(chars.len());

    let label_field: String = chars[..label_end].iter().collect();
    let operation_field: String = if label_end < operation_end {
        chars[label_end..operation_end].iter().collect()
    } else {
        String::new()
    };
    let operand_field: String = if operation_end < chars.len() {
        chars[operation_end..].iter().collect()
    } else {
        String::new()
    };

    let label = label_field.trim_end();
    let label = if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    };

    Ok(Some(Segment {
        line_number,
        label,
        operation: operation_field.trim().to_string(),
        operand: operand_field.trim().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_label_operation_operand() {
        let seg = segment_line("PROG     START   1000", 1).unwrap().unwrap();
        assert_eq!(seg.label.as_deref(), Some("PROG"));
        assert_eq!(seg.operation, "START");
        assert_eq!(seg.operand, "1000");
    }

    #[test]
    fn no_label_column_leaves_label_none() {
        let seg = segment_line("         END     FIRST", 3).unwrap().unwrap();
        assert_eq!(seg.label, None);
        assert_eq!(seg.operation, "END");
        assert_eq!(seg.operand, "FIRST");
    }

    #[test]
    fn operation_only_line_has_empty_operand() {
        let seg = segment_line("FIRST    RSUB", 2).unwrap().unwrap();
        assert_eq!(seg.label.as_deref(), Some("FIRST"));
        assert_eq!(seg.operation, "RSUB");
        assert_eq!(seg.operand, "");
    }

    #[test]
    fn comment_line_is_skipped() {
        assert_eq!(segment_line("# a comment", 4).unwrap(), None);
    }

    #[test]
    fn control_byte_first_char_is_blank_record() {
        let err = segment_line("\tnotacomment", 5).unwrap_err();
        assert_eq!(err, AssemblyError::BlankRecord(5));
    }

    #[test]
    fn empty_line_is_a_blank_record() {
        let err = segment_line("", 6).unwrap_err();
        assert_eq!(err, AssemblyError::BlankRecord(6));
    }
}
