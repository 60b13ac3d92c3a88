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

use thiserror::Error;

/// Every way assembly can fail. Each variant carries enough context (line
/// number, offending token) to print a self-contained diagnostic.
#[derive(Error, Debug, PartialEq)]
pub enum AssemblyError {
    #[error("no input file given")]
    MissingCommandLineArguments,

    #[error("could not open file: {0}")]
    FileNotFound(String),

    #[error("line {0}: blank record")]
    BlankRecord(usize),

    #[error("line {line}: symbol \"{name}\" collides with a directive or opcode mnemonic")]
    IllegalSymbol { line: usize, name: String },

    #[error("line {line}: \"{operation}\" is neither a directive nor an opcode")]
    IllegalOpcodeDirective { line: usize, operation: String },

    #[error("line {line}: symbol \"{name}\" already defined")]
    DuplicateSymbol { line: usize, name: String },

    #[error("line {line}: undefined symbol \"{name}\"")]
    UnknownSymbol { line: usize, name: String },

    #[error("line {line}: BYTE literal \"{literal}\" has the wrong length")]
    OutOfRangeByte { line: usize, literal: String },

    #[error(
        "line {line}: \"{operand}\" is out of range for PC-relative or base-relative addressing"
    )]
    AddressOutOfRange { line: usize, operand: String },

    #[error("location counter exceeded 0x100000 at line {0}")]
    OutOfMemory(usize),

    #[error("line {line}: {reason}")]
    StructuralError { line: usize, reason: String },
}
