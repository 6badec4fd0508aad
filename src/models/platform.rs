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

use serde::{Deserialize, Serialize};

/// Coarse OS lineage, as reported by the `dwPlatformId` field of the legacy version call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    #[default]
    Nt,
    Win9x,
    Win32s,
}

impl PlatformFamily {
    pub const VER_PLATFORM_WIN32S: u32 = 0;
    pub const VER_PLATFORM_WIN32_WINDOWS: u32 = 1;
    pub const VER_PLATFORM_WIN32_NT: u32 = 2;

    pub fn from_platform_id(id: u32) -> Option<Self> {
        match id {
            Self::VER_PLATFORM_WIN32_NT => Some(PlatformFamily::Nt),
            Self::VER_PLATFORM_WIN32_WINDOWS => Some(PlatformFamily::Win9x),
            Self::VER_PLATFORM_WIN32S => Some(PlatformFamily::Win32s),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let family = match self {
            PlatformFamily::Nt => "Windows NT",
            PlatformFamily::Win9x => "Windows 9x",
            PlatformFamily::Win32s => "Win32s",
        };
        write!(f, "{family}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Workstation,
    DomainController,
    Server,
    #[default]
    Unknown,
}

impl ProductType {
    pub const VER_NT_WORKSTATION: u8 = 1;
    pub const VER_NT_DOMAIN_CONTROLLER: u8 = 2;
    pub const VER_NT_SERVER: u8 = 3;

    pub fn from_raw(raw: u8) -> Self {
        match raw {
            Self::VER_NT_WORKSTATION => ProductType::Workstation,
            Self::VER_NT_DOMAIN_CONTROLLER => ProductType::DomainController,
            Self::VER_NT_SERVER => ProductType::Server,
            _ => ProductType::Unknown,
        }
    }

    /// Native `wProductType` value, `None` for [`ProductType::Unknown`].
    pub fn raw(self) -> Option<u8> {
        match self {
            ProductType::Workstation => Some(Self::VER_NT_WORKSTATION),
            ProductType::DomainController => Some(Self::VER_NT_DOMAIN_CONTROLLER),
            ProductType::Server => Some(Self::VER_NT_SERVER),
            ProductType::Unknown => None,
        }
    }

    /// Parse the `ProductType` string stored under the ProductOptions registry key.
    pub fn from_product_options(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "WINNT" => ProductType::Workstation,
            "LANMANNT" | "SERVERNT" => ProductType::Server,
            _ => ProductType::Unknown,
        }
    }

    pub fn is_server(self) -> bool {
        matches!(self, ProductType::Server | ProductType::DomainController)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorArchitecture {
    X86,
    X64,
    Ia64,
    Arm64,
    #[default]
    Unknown,
}

impl ProcessorArchitecture {
    pub const PROCESSOR_ARCHITECTURE_INTEL: u16 = 0;
    pub const PROCESSOR_ARCHITECTURE_IA64: u16 = 6;
    pub const PROCESSOR_ARCHITECTURE_AMD64: u16 = 9;
    pub const PROCESSOR_ARCHITECTURE_ARM64: u16 = 12;

    pub fn from_raw(raw: u16) -> Self {
        match raw {
            Self::PROCESSOR_ARCHITECTURE_INTEL => ProcessorArchitecture::X86,
            Self::PROCESSOR_ARCHITECTURE_AMD64 => ProcessorArchitecture::X64,
            Self::PROCESSOR_ARCHITECTURE_IA64 => ProcessorArchitecture::Ia64,
            Self::PROCESSOR_ARCHITECTURE_ARM64 => ProcessorArchitecture::Arm64,
            _ => ProcessorArchitecture::Unknown,
        }
    }

    pub fn is_64bit(self) -> bool {
        matches!(
            self,
            ProcessorArchitecture::X64 | ProcessorArchitecture::Ia64 | ProcessorArchitecture::Arm64
        )
    }
}

impl std::fmt::Display for ProcessorArchitecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arch = match self {
            ProcessorArchitecture::X86 => "x86",
            ProcessorArchitecture::X64 => "x64",
            ProcessorArchitecture::Ia64 => "ia64",
            ProcessorArchitecture::Arm64 => "arm64",
            ProcessorArchitecture::Unknown => "unknown",
        };
        write!(f, "{arch}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_family_from_id() {
        assert_eq!(PlatformFamily::from_platform_id(2), Some(PlatformFamily::Nt));
        assert_eq!(
            PlatformFamily::from_platform_id(1),
            Some(PlatformFamily::Win9x)
        );
        assert_eq!(
            PlatformFamily::from_platform_id(0),
            Some(PlatformFamily::Win32s)
        );
        assert_eq!(PlatformFamily::from_platform_id(3), None);
    }

    #[test]
    fn test_product_type_raw_round_trip() {
        for product_type in [
            ProductType::Workstation,
            ProductType::DomainController,
            ProductType::Server,
        ] {
            let raw = product_type.raw().unwrap();
            assert_eq!(ProductType::from_raw(raw), product_type);
        }
        assert_eq!(ProductType::Unknown.raw(), None);
        assert_eq!(ProductType::from_raw(0), ProductType::Unknown);
    }

    #[test]
    fn test_product_options_strings() {
        assert_eq!(
            ProductType::from_product_options("WinNT"),
            ProductType::Workstation
        );
        assert_eq!(
            ProductType::from_product_options("LanmanNT"),
            ProductType::Server
        );
        assert_eq!(
            ProductType::from_product_options("ServerNT "),
            ProductType::Server
        );
        assert_eq!(ProductType::from_product_options(""), ProductType::Unknown);
    }

    #[test]
    fn test_is_server() {
        assert!(ProductType::Server.is_server());
        assert!(ProductType::DomainController.is_server());
        assert!(!ProductType::Workstation.is_server());
        assert!(!ProductType::Unknown.is_server());
    }

    #[test]
    fn test_architecture_from_raw() {
        assert_eq!(ProcessorArchitecture::from_raw(0), ProcessorArchitecture::X86);
        assert_eq!(ProcessorArchitecture::from_raw(9), ProcessorArchitecture::X64);
        assert_eq!(ProcessorArchitecture::from_raw(6), ProcessorArchitecture::Ia64);
        assert_eq!(
            ProcessorArchitecture::from_raw(12),
            ProcessorArchitecture::Arm64
        );
        // 32-bit ARM is not a distinguished architecture
        assert_eq!(
            ProcessorArchitecture::from_raw(5),
            ProcessorArchitecture::Unknown
        );
        assert!(ProcessorArchitecture::Arm64.is_64bit());
        assert!(!ProcessorArchitecture::X86.is_64bit());
    }
}
