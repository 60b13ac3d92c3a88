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

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod file_reader;
pub mod parser;
pub mod records;
pub mod segmenter;
pub mod tables;

use std::path::Path;

use anyhow::{Context, Result};
use file_reader::FileReader;

extern crate pest;
extern crate pest_derive;

/// Output of a full assembly run: the listing file text and the object file
/// text, each ready to be written as-is.
pub struct AssemblyOutput {
    pub listing: String,
    pub object: String,
}

/// Runs both passes over the source at `source_path`, read through `reader`.
pub fn assemble<F: FileReader>(source_path: &Path, reader: &F) -> Result<AssemblyOutput> {
    let source = reader
        .read_to_string(source_path)
        .with_context(|| format!("failed to read source file: {}", source_path.display()))?;

    let pass1 =
        assembler::build_symbol_table(&source).context("failed during assembler pass 1")?;

    let pass2 = assembler::generate_output(&source, &pass1)
        .context("failed during assembler pass 2")?;

    Ok(AssemblyOutput {
        listing: pass2.listing,
        object: pass2.object,
    })
}
