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

use crate::ast::Symbol;
use crate::errors::AssemblyError;
use std::collections::HashMap;

/// Write-once after Pass 1: label name to absolute address. No iteration
/// order is observable except through the listing, so a hash map is fine.
pub type SymbolTable = HashMap<String, Symbol>;

/// Inserts a new label, failing if it is already present.
pub fn insert_symbol(
    table: &mut SymbolTable,
    name: &str,
    address: u32,
    line: usize,
) -> Result<(), AssemblyError> {
    if table.contains_key(name) {
        return Err(AssemblyError::DuplicateSymbol {
            line,
            name: name.to_string(),
        });
    }
    table.insert(name.to_string(), Symbol { address });
    Ok(())
}

/// Looks up a label's address, failing if it was never defined.
pub fn get_symbol<'a>(
    table: &'a SymbolTable,
    name: &str,
    line: usize,
) -> Result<&'a Symbol, AssemblyError> {
    table.get(name).ok_or_else(|| AssemblyError::UnknownSymbol {
        line,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup_roundtrips() {
        let mut table = SymbolTable::new();
        insert_symbol(&mut table, "BUFFER", 0x1100, 3).unwrap();
        assert_eq!(get_symbol(&table, "BUFFER", 10).unwrap().address, 0x1100);
    }

    #[test]
    fn duplicate_insert_fails() {
        let mut table = SymbolTable::new();
        insert_symbol(&mut table, "BUFFER", 0x1100, 3).unwrap();
        let err = insert_symbol(&mut table, "BUFFER", 0x2000, 9).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::DuplicateSymbol {
                line: 9,
                name: "BUFFER".to_string(),
            }
        );
    }

    #[test]
    fn unknown_lookup_fails() {
        let table = SymbolTable::new();
        let err = get_symbol(&table, "NOPE", 4).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::UnknownSymbol {
                line: 4,
                name: "NOPE".to_string(),
            }
        );
    }
}
