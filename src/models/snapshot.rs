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

use crate::error::{Result, SysverError};
use crate::models::platform::{PlatformFamily, ProcessorArchitecture, ProductType};
use crate::models::suite::{AuxiliaryFlags, SuiteMask};
use serde::{Deserialize, Serialize};

/// Raw version signals captured once from the host.
///
/// Every field is plain data: a snapshot can be captured on one machine, serialized and
/// classified somewhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionSnapshot {
    pub platform: PlatformFamily,
    pub major: u32,
    pub minor: u32,
    /// Zero when the build could not be determined.
    pub build: u32,
    /// Update build revision (`UBR`). Not validated; zero when unavailable.
    pub revision: u32,
    pub service_pack_major: u16,
    pub service_pack_minor: u16,
    pub csd_version: String,
    pub product_type: ProductType,
    pub suite_mask: SuiteMask,
    /// `GetProductInfo` edition code, zero when unavailable.
    pub product_info: u32,
    pub architecture: ProcessorArchitecture,
    pub comparator_available: bool,
    pub aux: AuxiliaryFlags,
    /// `EditionID` registry string, Vista and later.
    pub edition_id: String,
    /// `ProductType` string from the ProductOptions registry key.
    pub legacy_product_type: String,
    /// Major/minor as returned by the legacy call. Zero when not captured.
    pub reported_major: u32,
    pub reported_minor: u32,
}

impl VersionSnapshot {
    /// NT-family snapshot with the given version, everything else defaulted.
    pub fn nt(major: u32, minor: u32, build: u32) -> Self {
        Self {
            platform: PlatformFamily::Nt,
            major,
            minor,
            build,
            ..Default::default()
        }
    }

    pub fn win9x(minor: u32, build: u32) -> Self {
        Self {
            platform: PlatformFamily::Win9x,
            major: 4,
            minor,
            build,
            ..Default::default()
        }
    }

    pub fn with_revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn with_architecture(mut self, architecture: ProcessorArchitecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn with_suite_mask(mut self, suite_mask: SuiteMask) -> Self {
        self.suite_mask = suite_mask;
        self
    }

    pub fn with_product_info(mut self, product_info: u32) -> Self {
        self.product_info = product_info;
        self
    }

    pub fn with_service_pack(mut self, major: u16, minor: u16, csd_version: &str) -> Self {
        self.service_pack_major = major;
        self.service_pack_minor = minor;
        self.csd_version = csd_version.to_string();
        self
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| SysverError::ConfigError(format!("Failed to parse snapshot: {e}")))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SysverError::ConfigError(format!("Failed to serialize snapshot: {e}")))
    }
}
