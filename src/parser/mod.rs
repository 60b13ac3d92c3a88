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

//! Grammar-driven parsing of instruction operand syntax: addressing-mode
//! prefixes, the indexed suffix, and Format-2 register pairs. Fixed-column
//! line layout is handled by `crate::segmenter` instead, since pest parses
//! token streams rather than byte columns.

use crate::ast::{AddressingMode, OperandValue, ParsedOperand, Register};
use crate::errors::AssemblyError;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct OperandParser;

/// Parses a non-directive instruction operand into its addressing mode,
/// indexed flag, and cleaned value.
pub fn parse_operand(raw: &str, line: usize) -> Result<ParsedOperand, AssemblyError> {
    if raw.is_empty() {
        return Ok(ParsedOperand {
            mode: AddressingMode::Simple,
            indexed: false,
            value: OperandValue::Empty,
        });
    }

    let mut pairs = OperandParser::parse(Rule::sic_operand, raw).map_err(|e| {
        AssemblyError::StructuralError {
            line,
            reason: format!("malformed operand \"{raw}\": {e}"),
        }
    })?;
    let sic_operand = pairs.next().expect("sic_operand always produced on success");

    let mut mode = AddressingMode::Simple;
    let mut indexed = false;
    let mut value = OperandValue::Empty;

    for part in sic_operand.into_inner() {
        match part.as_rule() {
            Rule::prefix => {
                mode = match part.as_str() {
                    "#" => AddressingMode::Immediate,
                    "@" => AddressingMode::Indirect,
                    _ => unreachable!("grammar only allows # or @ as a prefix"),
                };
            }
            Rule::value => {
                value = parse_value(&part);
            }
            Rule::index_suffix => {
                indexed = true;
            }
            Rule::EOI => {}
            other => unreachable!("unexpected operand sub-rule: {other:?}"),
        }
    }

    Ok(ParsedOperand {
        mode,
        indexed,
        value,
    })
}

fn parse_value(pair: &Pair<Rule>) -> OperandValue {
    let text = pair.as_str();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        OperandValue::Numeric(text.parse().expect("validated all-digit text parses as i64"))
    } else {
        OperandValue::Symbol(text.to_string())
    }
}

/// Parses a Format-2 register operand, e.g. `A` or `S,T`.
pub fn parse_register_pair(
    raw: &str,
    line: usize,
) -> Result<(Register, Option<Register>), AssemblyError> {
    let mut pairs = OperandParser::parse(Rule::register_pair, raw).map_err(|e| {
        AssemblyError::StructuralError {
            line,
            reason: format!("malformed register operand \"{raw}\": {e}"),
        }
    })?;
    let register_pair = pairs
        .next()
        .expect("register_pair always produced on success");

    let mut registers = register_pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::register)
        .map(|p| {
            Register::from_name(&p.as_str().to_uppercase()).ok_or_else(|| {
                AssemblyError::StructuralError {
                    line,
                    reason: format!("unknown register \"{}\"", p.as_str()),
                }
            })
        });

    let first = registers
        .next()
        .ok_or_else(|| AssemblyError::StructuralError {
            line,
            reason: "register operand must name at least one register".to_string(),
        })??;
    let second = registers.next().transpose()?;

    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_operand_is_empty_value() {
        let parsed = parse_operand("", 1).unwrap();
        assert_eq!(parsed.value, OperandValue::Empty);
    }

    #[test]
    fn immediate_numeric_operand() {
        let parsed = parse_operand("#5", 1).unwrap();
        assert_eq!(parsed.mode, AddressingMode::Immediate);
        assert_eq!(parsed.value, OperandValue::Numeric(5));
        assert!(!parsed.indexed);
    }

    #[test]
    fn indirect_symbol_operand() {
        let parsed = parse_operand("@BUFFER", 1).unwrap();
        assert_eq!(parsed.mode, AddressingMode::Indirect);
        assert_eq!(parsed.value, OperandValue::Symbol("BUFFER".to_string()));
    }

    #[test]
    fn simple_indexed_operand() {
        let parsed = parse_operand("BUFFER,X", 1).unwrap();
        assert_eq!(parsed.mode, AddressingMode::Simple);
        assert!(parsed.indexed);
        assert_eq!(parsed.value, OperandValue::Symbol("BUFFER".to_string()));
    }

    #[test]
    fn malformed_operand_is_structural_error() {
        assert!(parse_operand("#", 3).is_err());
    }

    #[test]
    fn single_register_pair() {
        let (r1, r2) = parse_register_pair("A", 1).unwrap();
        assert_eq!(r1, Register::A);
        assert_eq!(r2, None);
    }

    #[test]
    fn two_register_pair() {
        let (r1, r2) = parse_register_pair("S,T", 1).unwrap();
        assert_eq!(r1, Register::S);
        assert_eq!(r2, Some(Register::T));
    }
}
