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

use sicasm::assemble;
use sicasm::errors::AssemblyError;
use sicasm::file_reader::AsmFileReader;
use clap::Parser as clap_parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap_parser)]
#[clap(version = "0.3.4", author = "Connor Nolan")]
struct Opts {
    /// Path to a SIC/XE source file; the listing and object files are
    /// written beside it with the same stem and extensions .lst/.obj.
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    match run(opts.input) {
        Ok(()) => {
            println!("Done!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(255)
        }
    }
}

fn run(input: Option<PathBuf>) -> anyhow::Result<()> {
    let input = input.ok_or(AssemblyError::MissingCommandLineArguments)?;
    let reader = AsmFileReader;
    let output = assemble(&input, &reader)?;

    let listing_path = input.with_extension("lst");
    let object_path = input.with_extension("obj");

    std::fs::write(&listing_path, &output.listing)
        .map_err(|_| AssemblyError::FileNotFound(listing_path.display().to_string()))?;
    std::fs::write(&object_path, &output.object)
        .map_err(|_| AssemblyError::FileNotFound(object_path.display().to_string()))?;

    Ok(())
}
