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

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Legacy `wSuiteMask` capability bits. Only meaningful before Windows Vista.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SuiteMask: u16 {
        const SMALLBUSINESS = 0x0001;
        const ENTERPRISE = 0x0002;
        const BACKOFFICE = 0x0004;
        const COMMUNICATIONS = 0x0008;
        const TERMINAL = 0x0010;
        const SMALLBUSINESS_RESTRICTED = 0x0020;
        const EMBEDDEDNT = 0x0040;
        const DATACENTER = 0x0080;
        const SINGLEUSERTS = 0x0100;
        const PERSONAL = 0x0200;
        const BLADE = 0x0400;
        const EMBEDDED_RESTRICTED = 0x0800;
        const SECURITY_APPLIANCE = 0x1000;
        const STORAGE_SERVER = 0x2000;
        const COMPUTE_SERVER = 0x4000;
        const WH_SERVER = 0x8000;
    }
}

/// Capability flags reported through `GetSystemMetrics` rather than the version fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliaryFlags {
    /// Windows Server 2003 R2 (`SM_SERVERR2`); R2 does not change the version number.
    pub server_r2: bool,
    pub media_center: bool,
    pub tablet_pc: bool,
    pub starter: bool,
}
