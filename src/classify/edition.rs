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

use super::product_codes::edition_for_code;
use crate::models::{
    OsProduct, PlatformFamily, ProcessorArchitecture, ProductType, SuiteMask, VersionSnapshot,
};

/// Resolve the edition string for an already classified product.
///
/// Vista and later come from the product info code, falling back to the `EditionID`
/// registry value. Older NT releases are worked out from suite bits and the
/// auxiliary metrics. Windows 9x and Win32s have no editions.
pub fn resolve_edition(
    snapshot: &VersionSnapshot,
    product: OsProduct,
    product_type: ProductType,
) -> Option<String> {
    if snapshot.platform != PlatformFamily::Nt {
        return None;
    }

    if snapshot.major >= 6 {
        return edition_for_code(snapshot.product_info)
            .map(str::to_string)
            .or_else(|| {
                let id = snapshot.edition_id.trim();
                (!id.is_empty()).then(|| id.to_string())
            });
    }

    let suite = snapshot.suite_mask;
    let edition = match product {
        OsProduct::WinNt => nt_edition(snapshot, suite, product_type),
        OsProduct::Win2K => win2k_edition(suite, product_type),
        OsProduct::WinXp => xp_edition(snapshot, suite),
        OsProduct::WinSvr2003 | OsProduct::WinSvr2003R2 => {
            server_2003_edition(suite, snapshot.architecture)
        }
        _ => return None,
    };
    Some(edition.to_string())
}

fn nt_edition(
    snapshot: &VersionSnapshot,
    suite: SuiteMask,
    product_type: ProductType,
) -> &'static str {
    if !product_type.is_server() {
        return "Workstation";
    }
    if suite.contains(SuiteMask::ENTERPRISE) {
        "Server, Enterprise Edition"
    } else if snapshot.legacy_product_type.eq_ignore_ascii_case("SERVERNT") {
        "Advanced Server"
    } else {
        "Server"
    }
}

fn win2k_edition(suite: SuiteMask, product_type: ProductType) -> &'static str {
    if !product_type.is_server() {
        "Professional"
    } else if suite.contains(SuiteMask::DATACENTER) {
        "Datacenter Server"
    } else if suite.contains(SuiteMask::ENTERPRISE) {
        "Advanced Server"
    } else {
        "Server"
    }
}

fn xp_edition(snapshot: &VersionSnapshot, suite: SuiteMask) -> &'static str {
    // 5.2 workstation is only ever the x64 build of XP
    if snapshot.minor == 2 {
        return "Professional x64 Edition";
    }
    let aux = snapshot.aux;
    if aux.starter {
        "Starter Edition"
    } else if aux.media_center {
        "Media Center Edition"
    } else if aux.tablet_pc {
        "Tablet PC Edition"
    } else if suite.contains(SuiteMask::EMBEDDEDNT) {
        "Embedded"
    } else if suite.contains(SuiteMask::PERSONAL) {
        "Home Edition"
    } else {
        "Professional"
    }
}

fn server_2003_edition(suite: SuiteMask, architecture: ProcessorArchitecture) -> &'static str {
    let datacenter = suite.contains(SuiteMask::DATACENTER);
    let enterprise = suite.contains(SuiteMask::ENTERPRISE);

    match architecture {
        ProcessorArchitecture::Ia64 if datacenter => {
            return "Datacenter Edition for Itanium-based Systems";
        }
        ProcessorArchitecture::Ia64 if enterprise => {
            return "Enterprise Edition for Itanium-based Systems";
        }
        ProcessorArchitecture::X64 if datacenter => return "Datacenter x64 Edition",
        ProcessorArchitecture::X64 if enterprise => return "Enterprise x64 Edition",
        ProcessorArchitecture::X64 => return "Standard x64 Edition",
        _ => {}
    }

    if datacenter {
        "Datacenter Edition"
    } else if enterprise {
        "Enterprise Edition"
    } else if suite.contains(SuiteMask::BLADE) {
        "Web Edition"
    } else if suite.contains(SuiteMask::SMALLBUSINESS_RESTRICTED) {
        "Small Business Server"
    } else if suite.contains(SuiteMask::STORAGE_SERVER) {
        "Storage Server"
    } else if suite.contains(SuiteMask::COMPUTE_SERVER) {
        "Compute Cluster Edition"
    } else if suite.contains(SuiteMask::WH_SERVER) {
        "Home Server"
    } else {
        "Standard Edition"
    }
}
