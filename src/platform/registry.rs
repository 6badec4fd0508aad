// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Read-only registry access.
//!
//! Absent keys and values read as defaults. A value that exists with a data kind other
//! than the one asked for is an [`SysverError::UnexpectedRegistryType`].

use crate::error::{Result, SysverError};
use std::collections::HashMap;

/// A registry value together with its data kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryValue {
    String(String),
    Dword(u32),
    Binary(Vec<u8>),
    /// Any other kind (`REG_QWORD`, `REG_MULTI_SZ`, ...), carrying the kind's name.
    Other(String),
}

impl RegistryValue {
    pub fn kind(&self) -> &str {
        match self {
            RegistryValue::String(_) => "REG_SZ",
            RegistryValue::Dword(_) => "REG_DWORD",
            RegistryValue::Binary(_) => "REG_BINARY",
            RegistryValue::Other(kind) => kind,
        }
    }
}

/// Source of values below `HKEY_LOCAL_MACHINE`.
pub trait RegistryReader: Send + Sync {
    /// `None` when the key or the value does not exist or cannot be read.
    fn read_value(&self, key: &str, name: &str) -> Option<RegistryValue>;
}

fn unexpected(key: &str, name: &str, expected: &'static str, found: &RegistryValue) -> SysverError {
    SysverError::UnexpectedRegistryType {
        key: key.to_string(),
        value: name.to_string(),
        expected,
        found: found.kind().to_string(),
    }
}

pub fn read_string(registry: &dyn RegistryReader, key: &str, name: &str) -> Result<String> {
    match registry.read_value(key, name) {
        None => Ok(String::new()),
        Some(RegistryValue::String(value)) => Ok(value),
        Some(other) => Err(unexpected(key, name, "REG_SZ", &other)),
    }
}

pub fn read_u32(registry: &dyn RegistryReader, key: &str, name: &str) -> Result<u32> {
    match registry.read_value(key, name) {
        None => Ok(0),
        Some(RegistryValue::Dword(value)) => Ok(value),
        Some(other) => Err(unexpected(key, name, "REG_DWORD", &other)),
    }
}

pub fn read_binary(registry: &dyn RegistryReader, key: &str, name: &str) -> Result<Vec<u8>> {
    match registry.read_value(key, name) {
        None => Ok(Vec::new()),
        Some(RegistryValue::Binary(value)) => Ok(value),
        Some(other) => Err(unexpected(key, name, "REG_BINARY", &other)),
    }
}

/// Registry backed by a map, for captured snapshots and hosts without a registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    values: HashMap<(String, String), RegistryValue>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, name: &str, value: RegistryValue) -> Self {
        self.insert(key, name, value);
        self
    }

    pub fn insert(&mut self, key: &str, name: &str, value: RegistryValue) {
        // Registry names are case-insensitive
        self.values
            .insert((key.to_ascii_lowercase(), name.to_ascii_lowercase()), value);
    }
}

impl RegistryReader for InMemoryRegistry {
    fn read_value(&self, key: &str, name: &str) -> Option<RegistryValue> {
        self.values
            .get(&(key.to_ascii_lowercase(), name.to_ascii_lowercase()))
            .cloned()
    }
}

#[cfg(windows)]
pub use native::WindowsRegistry;

#[cfg(windows)]
mod native {
    use super::{RegistryReader, RegistryValue};
    use winreg::RegKey;
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_64KEY, RegType};
    use winreg::types::FromRegValue;

    /// `HKEY_LOCAL_MACHINE` through winreg.
    pub struct WindowsRegistry {
        use_64bit_view: bool,
    }

    impl WindowsRegistry {
        pub fn new(use_64bit_view: bool) -> Self {
            Self { use_64bit_view }
        }
    }

    impl RegistryReader for WindowsRegistry {
        fn read_value(&self, key: &str, name: &str) -> Option<RegistryValue> {
            let flags = if self.use_64bit_view {
                KEY_READ | KEY_WOW64_64KEY
            } else {
                KEY_READ
            };
            let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
            let subkey = match hklm.open_subkey_with_flags(key, flags) {
                Ok(subkey) => subkey,
                Err(e) => {
                    log::debug!("Registry key {key} not readable: {e}");
                    return None;
                }
            };
            let raw = match subkey.get_raw_value(name) {
                Ok(raw) => raw,
                Err(e) => {
                    log::debug!("Registry value {key}\\{name} not readable: {e}");
                    return None;
                }
            };

            match raw.vtype {
                RegType::REG_SZ | RegType::REG_EXPAND_SZ => {
                    String::from_reg_value(&raw).ok().map(RegistryValue::String)
                }
                RegType::REG_DWORD => u32::from_reg_value(&raw).ok().map(RegistryValue::Dword),
                RegType::REG_BINARY => Some(RegistryValue::Binary(raw.bytes.to_vec())),
                other => Some(RegistryValue::Other(format!("{other:?}"))),
            }
        }
    }
}
