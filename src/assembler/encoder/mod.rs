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

//! The encoder: turns a mnemonic plus operand into a 1/2/3/4-byte SIC/XE
//! object code word. Pure functions over already-resolved state — no I/O,
//! no mutation of the symbol table or address state.

pub mod components;
pub mod constants;

use crate::assembler::symbol_table::{SymbolTable, get_symbol};
use crate::ast::{AddressingMode, OpcodeDescriptor, OperandValue, ParsedOperand};
use crate::errors::AssemblyError;
use crate::parser;
use components::*;

/// Encodes one instruction statement. `current` is the address of this
/// instruction's first byte; `base` is the address state's effective BASE
/// value. Returns the object code value and its byte length.
pub fn encode_instruction(
    descriptor: OpcodeDescriptor,
    operand_raw: &str,
    current: u32,
    base: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<(u32, u32), AssemblyError> {
    match descriptor.format {
        1 => Ok((pack_format1(&descriptor), 1)),
        2 => {
            let (r1, r2) = parser::parse_register_pair(operand_raw, line)?;
            let r2_code = r2.map(|r| r.code()).unwrap_or(0);
            Ok((pack_format2(&descriptor, r1.code(), r2_code), 2))
        }
        3 => encode_format3(&descriptor, operand_raw, current, base, symbol_table, line)
            .map(|code| (code, 3)),
        4 => encode_format4(&descriptor, operand_raw, symbol_table, line).map(|code| (code, 4)),
        other => panic!("opcode table produced an impossible format {other}"),
    }
}

fn encode_format3(
    descriptor: &OpcodeDescriptor,
    operand_raw: &str,
    current: u32,
    base: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    let operand = parser::parse_operand(operand_raw, line)?;

    if operand.value == OperandValue::Empty {
        return Ok(pack_empty_operand(descriptor));
    }

    let (n, i, x) = flags_from_operand(&operand);
    let byte1 = opcode_byte(descriptor, n, i);

    if operand.mode == AddressingMode::Immediate {
        if let OperandValue::Numeric(value) = operand.value {
            return Ok(pack_numeric_immediate_format3(byte1, value));
        }
    }

    let target = resolve_target(&operand, symbol_table, line)?;
    let next_pc = current + 3;
    let (b, p, disp) = resolve_format3_displacement(target, next_pc, base, operand_raw, line)?;
    Ok(pack_format3_symbolic(byte1, x, b, p, disp))
}

fn encode_format4(
    descriptor: &OpcodeDescriptor,
    operand_raw: &str,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    let operand = parser::parse_operand(operand_raw, line)?;

    if operand.value == OperandValue::Empty {
        return Ok(pack_empty_operand(descriptor) << 8);
    }

    let (n, i, x) = flags_from_operand(&operand);
    let byte1 = opcode_byte(descriptor, n, i);

    if operand.mode == AddressingMode::Immediate {
        if let OperandValue::Numeric(value) = operand.value {
            return Ok(pack_numeric_immediate_format4(byte1, value));
        }
    }

    let target = resolve_target(&operand, symbol_table, line)?;
    Ok(pack_format4_symbolic(byte1, x, target))
}

fn resolve_target(
    operand: &ParsedOperand,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    match &operand.value {
        OperandValue::Numeric(value) => Ok(*value as u32),
        OperandValue::Symbol(name) => Ok(get_symbol(symbol_table, name, line)?.address),
        OperandValue::Empty => unreachable!("empty operand handled before reaching resolve_target"),
    }
}
