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

/// Inclusive bounds of the 12-bit signed PC-relative displacement.
pub const PC_MIN: i64 = -2048;
pub const PC_MAX: i64 = 2047;

/// Inclusive upper bound of the 12-bit unsigned base-relative displacement.
pub const BASE_MAX: i64 = 4095;

/// Largest program size a 20-bit address space can hold.
pub const ADDRESS_SPACE_LIMIT: u32 = 0x100000;

/// Maximum bytes a single text record may carry before it must be flushed.
pub const MAX_TEXT_RECORD_BYTES: usize = 30;
