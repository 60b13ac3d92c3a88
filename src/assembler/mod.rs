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

pub mod encoder;
pub mod symbol_table;

use crate::ast::{DirectiveKind, Segment};
use crate::errors::AssemblyError;
use crate::records::{self, TextRecord};
use crate::segmenter;
use crate::tables;
use encoder::constants::ADDRESS_SPACE_LIMIT;
use symbol_table::{SymbolTable, get_symbol, insert_symbol};

/// The four 20-bit fields a driver threads through a pass: origin, location
/// counter, the current statement's byte increment, and the effective BASE
/// value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressState {
    pub start: u32,
    pub current: u32,
    pub increment: u32,
    pub base: u32,
}

/// Everything Pass 1 produces: the completed symbol table plus the program's
/// origin and size, both needed up front by Pass 2 (the header record can be
/// emitted before any text record, since the size is already known).
pub struct Pass1Output {
    pub symbol_table: SymbolTable,
    pub start: u32,
    pub size: u32,
}

/// Walks the source once, assigning an address to every labeled line and
/// determining the final program size.
pub fn build_symbol_table(source: &str) -> Result<Pass1Output, AssemblyError> {
    let mut symbol_table = SymbolTable::new();
    let mut state = AddressState::default();

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;

        if state.current >= ADDRESS_SPACE_LIMIT {
            return Err(AssemblyError::OutOfMemory(line_number));
        }

        let segment = match segmenter::segment_line(raw_line, line_number)? {
            Some(segment) => segment,
            None => continue,
        };
        if segment.is_comment() {
            continue;
        }

        check_label_legal(&segment)?;

        let directive = DirectiveKind::recognize(&segment.operation);

        if directive.is_start() {
            state.start = parse_hex_address(&segment.operand, line_number)?;
            state.current = state.start;
            continue;
        }

        state.increment = statement_increment(&segment, directive, line_number)?;

        if let Some(label) = &segment.label {
            insert_symbol(&mut symbol_table, label, state.current, line_number)?;
        }

        state.current += state.increment;
    }

    let size = state.current - state.start;
    Ok(Pass1Output {
        symbol_table,
        start: state.start,
        size,
    })
}

fn check_label_legal(segment: &Segment) -> Result<(), AssemblyError> {
    let Some(label) = &segment.label else {
        return Ok(());
    };
    let collides = DirectiveKind::recognize(label) != DirectiveKind::None
        || tables::lookup_opcode(label).is_some();
    if collides {
        return Err(AssemblyError::IllegalSymbol {
            line: segment.line_number,
            name: label.clone(),
        });
    }
    Ok(())
}

fn statement_increment(
    segment: &Segment,
    directive: DirectiveKind,
    line_number: usize,
) -> Result<u32, AssemblyError> {
    if directive.is_end() || directive.is_base() {
        return Ok(0);
    }
    if directive.is_data() {
        return Ok(tables::parse_byte_literal(&segment.operand, line_number)?.size);
    }
    if directive.is_reserve() {
        let count = parse_decimal(&segment.operand, line_number)?;
        return Ok(match directive {
            DirectiveKind::Resb => count,
            DirectiveKind::Resw => count * 3,
            _ => unreachable!("is_reserve only matches Resb/Resw"),
        });
    }
    match tables::lookup_opcode(&segment.operation) {
        Some(descriptor) => Ok(descriptor.format as u32),
        None => Err(AssemblyError::IllegalOpcodeDirective {
            line: line_number,
            operation: segment.operation.clone(),
        }),
    }
}

fn parse_hex_address(operand: &str, line: usize) -> Result<u32, AssemblyError> {
    u32::from_str_radix(operand, 16).map_err(|_| AssemblyError::StructuralError {
        line,
        reason: format!("\"{operand}\" is not a valid hexadecimal address"),
    })
}

fn parse_decimal(operand: &str, line: usize) -> Result<u32, AssemblyError> {
    operand.parse().map_err(|_| AssemblyError::StructuralError {
        line,
        reason: format!("\"{operand}\" is not a valid decimal count"),
    })
}

/// Everything Pass 2 produces: the listing text and the object text, each
/// joined with `\n` and carrying no trailing newline (matching the END
/// listing line and the End record's own literal shape).
pub struct Pass2Output {
    pub listing: String,
    pub object: String,
}

/// Walks the source a second time, producing listing lines and accumulating
/// text records; invokes the Encoder for instructions and reads BYTE
/// literals directly.
pub fn generate_output(source: &str, pass1: &Pass1Output) -> Result<Pass2Output, AssemblyError> {
    let mut state = AddressState {
        start: pass1.start,
        current: pass1.start,
        increment: 0,
        base: 0,
    };

    let mut listing_lines: Vec<String> = Vec::new();
    let mut object_lines: Vec<String> = Vec::new();
    object_lines.push(records::format_header(&program_name(source), pass1.start, pass1.size));

    let mut buffer = TextRecord::new(state.start);
    let mut entry = pass1.start;

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;

        let segment = match segmenter::segment_line(raw_line, line_number)? {
            Some(segment) => segment,
            None => continue,
        };
        if segment.is_comment() {
            continue;
        }

        let directive = DirectiveKind::recognize(&segment.operation);
        let label_text = segment.label.as_deref().unwrap_or("");

        if directive.is_start() {
            state.start = parse_hex_address(&segment.operand, line_number)?;
            state.current = state.start;
            buffer = TextRecord::new(state.start);
            listing_lines.push(records::format_listing_directive(
                state.current,
                label_text,
                &segment.operation,
                &segment.operand,
            ));
            continue;
        }

        if directive.is_end() {
            entry = if segment.operand.is_empty() {
                state.start
            } else {
                get_symbol(&pass1.symbol_table, &segment.operand, line_number)?.address
            };
            listing_lines.push(records::format_listing_directive(
                state.current,
                label_text,
                &segment.operation,
                &segment.operand,
            ));
            continue;
        }

        if directive.is_base() {
            state.base = get_symbol(&pass1.symbol_table, &segment.operand, line_number)?.address;
            listing_lines.push(records::format_listing_directive(
                state.current,
                label_text,
                &segment.operation,
                &segment.operand,
            ));
            continue;
        }

        if directive.is_reserve() {
            if !buffer.is_empty() {
                object_lines.push(buffer.format());
                buffer = TextRecord::new(state.current);
            }
            let count = parse_decimal(&segment.operand, line_number)?;
            let size = match directive {
                DirectiveKind::Resb => count,
                DirectiveKind::Resw => count * 3,
                _ => unreachable!("is_reserve only matches Resb/Resw"),
            };
            listing_lines.push(records::format_listing_directive(
                state.current,
                label_text,
                &segment.operation,
                &segment.operand,
            ));
            state.current += size;
            buffer = TextRecord::new(state.current);
            continue;
        }

        if directive.is_data() {
            let literal = tables::parse_byte_literal(&segment.operand, line_number)?;
            if buffer.would_overflow(literal.size) {
                object_lines.push(buffer.format());
                buffer = TextRecord::new(state.current);
            }
            buffer.push(literal.size, literal.value as u32);
            listing_lines.push(records::format_listing_instruction(
                state.current,
                label_text,
                &segment.operation,
                &segment.operand,
                literal.value as u32,
                literal.size,
            ));
            state.current += literal.size;
            continue;
        }

        let descriptor = tables::lookup_opcode(&segment.operation).ok_or_else(|| {
            AssemblyError::IllegalOpcodeDirective {
                line: line_number,
                operation: segment.operation.clone(),
            }
        })?;
        let (code, nbytes) = encoder::encode_instruction(
            descriptor,
            &segment.operand,
            state.current,
            state.base,
            &pass1.symbol_table,
            line_number,
        )?;
        if buffer.would_overflow(nbytes) {
            object_lines.push(buffer.format());
            buffer = TextRecord::new(state.current);
        }
        buffer.push(nbytes, code);
        listing_lines.push(records::format_listing_instruction(
            state.current,
            label_text,
            &segment.operation,
            &segment.operand,
            code,
            nbytes,
        ));
        state.current += nbytes;
    }

    if !buffer.is_empty() {
        object_lines.push(buffer.format());
    }
    object_lines.push(records::format_end(entry));

    Ok(Pass2Output {
        listing: listing_lines.join("\n"),
        object: object_lines.join("\n"),
    })
}

/// The program name is the label on the START line; empty if the source
/// never carries one (degenerate but not itself an error at this layer).
fn program_name(source: &str) -> String {
    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let Ok(Some(segment)) = segmenter::segment_line(raw_line, line_number) else {
            continue;
        };
        if DirectiveKind::recognize(&segment.operation).is_start() {
            return segment.label.unwrap_or_default();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1: &str = "PROG     START   1000\nFIRST    RSUB\n         END     FIRST";

    #[test]
    fn pass1_assigns_start_and_symbol_address() {
        let output = build_symbol_table(S1).unwrap();
        assert_eq!(output.start, 0x1000);
        assert_eq!(output.size, 3);
        assert_eq!(
            get_symbol(&output.symbol_table, "FIRST", 1).unwrap().address,
            0x1000
        );
    }

    #[test]
    fn pass1_rejects_duplicate_labels() {
        let source = "PROG     START   1000\nA        RSUB\nA        RSUB\n         END     A";
        let err = build_symbol_table(source).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::DuplicateSymbol {
                line: 3,
                name: "A".to_string(),
            }
        );
    }

    #[test]
    fn pass1_rejects_label_matching_opcode() {
        let source = "PROG     START   1000\nRSUB     RSUB\n         END     RSUB";
        let err = build_symbol_table(source).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::IllegalSymbol {
                line: 2,
                name: "RSUB".to_string(),
            }
        );
    }

    #[test]
    fn pass2_produces_scenario_s1_object_and_listing() {
        let pass1 = build_symbol_table(S1).unwrap();
        let output = generate_output(S1, &pass1).unwrap();
        assert_eq!(
            output.object,
            "HPROG  001000000003\nT001000034F0000\nE001000"
        );
        assert!(output.listing.contains("RSUB"));
        assert!(!output.listing.ends_with('\n'));
    }
}
