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

//! One-time capture of the raw version signals.
//!
//! The legacy version call is trusted only when the verifier is unavailable or the host
//! predates Windows 8. Otherwise the version is probed through the comparator, field by
//! field from the coarsest, so compatibility shims cannot change the result.

use crate::comparator::{Comparator, Condition};
use crate::config::AcquisitionConfig;
use crate::error::Result;
use crate::models::{
    AuxiliaryFlags, PlatformFamily, ProcessorArchitecture, ProductType, SuiteMask,
    VersionSnapshot,
};
use crate::platform::constants::{
    EDITION_ID_VALUE, NT_CURRENT_VERSION_KEY, PRODUCT_OPTIONS_KEY, PRODUCT_TYPE_VALUE,
    SM_MEDIACENTER, SM_SERVERR2, SM_STARTER, SM_TABLETPC, UPDATE_REVISION_VALUE,
};
use crate::platform::registry::{read_string, read_u32};
use crate::platform::{NativeApi, OsVersionInfo, RegistryReader};

/// Probing starts here; anything older never reaches the probing path.
const PROBE_START_MAJOR: u32 = 6;

/// Version fields determined by probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbedVersion {
    pub major: u32,
    pub minor: u32,
    pub service_pack_major: u16,
    pub service_pack_minor: u16,
}

/// Build the process snapshot from the native API and the registry.
///
/// Missing native capabilities degrade to less precise sources. Only a registry value of
/// the wrong data kind is an error.
pub fn acquire(
    api: &dyn NativeApi,
    registry: &dyn RegistryReader,
    config: &AcquisitionConfig,
) -> Result<VersionSnapshot> {
    let legacy = api.basic_version_info().unwrap_or_else(|| {
        log::warn!("Legacy version call failed, version fields will be empty");
        OsVersionInfo {
            platform_id: PlatformFamily::VER_PLATFORM_WIN32_NT,
            ..Default::default()
        }
    });
    let platform = PlatformFamily::from_platform_id(legacy.platform_id).unwrap_or_else(|| {
        log::warn!("Unrecognised platform id {}, assuming NT", legacy.platform_id);
        PlatformFamily::Nt
    });

    let verifier_usable = platform == PlatformFamily::Nt && !config.force_legacy;
    let comparator = Comparator::new(api, verifier_usable);

    let mut snapshot = VersionSnapshot {
        platform,
        comparator_available: comparator.is_available(),
        reported_major: legacy.major,
        reported_minor: legacy.minor,
        ..Default::default()
    };

    let use_probing = comparator
        .compare_version(6, 2, 0, 0, Condition::GreaterEqual)
        .unwrap_or(false);

    if use_probing {
        log::debug!("Using probing path for version signals");
        apply_probed(&mut snapshot, &comparator, &legacy, config.probe_limit);
    } else {
        log::debug!(
            "Using legacy path for version signals (comparator available: {})",
            comparator.is_available()
        );
        apply_legacy(&mut snapshot, &legacy);
    }

    if platform == PlatformFamily::Nt {
        snapshot.legacy_product_type =
            read_string(registry, PRODUCT_OPTIONS_KEY, PRODUCT_TYPE_VALUE)?;
        if snapshot.product_type == ProductType::Unknown {
            snapshot.product_type =
                ProductType::from_product_options(&snapshot.legacy_product_type);
            log::debug!(
                "Product type from ProductOptions '{}': {:?}",
                snapshot.legacy_product_type,
                snapshot.product_type
            );
        }

        if snapshot.major >= 6 {
            snapshot.product_info = api
                .product_info(
                    snapshot.major,
                    snapshot.minor,
                    snapshot.service_pack_major,
                    snapshot.service_pack_minor,
                )
                .unwrap_or(0);
            snapshot.edition_id = read_string(registry, NT_CURRENT_VERSION_KEY, EDITION_ID_VALUE)?;
        }

        if snapshot.major >= 10 {
            snapshot.revision = read_u32(registry, NT_CURRENT_VERSION_KEY, UPDATE_REVISION_VALUE)?;
        }
    }

    snapshot.architecture = acquire_architecture(api);
    snapshot.aux = AuxiliaryFlags {
        server_r2: api.system_metric(SM_SERVERR2) != 0,
        media_center: api.system_metric(SM_MEDIACENTER) != 0,
        tablet_pc: api.system_metric(SM_TABLETPC) != 0,
        starter: api.system_metric(SM_STARTER) != 0,
    };

    log::debug!(
        "Acquired snapshot: {} {}.{}.{}.{} {:?} {}",
        snapshot.platform,
        snapshot.major,
        snapshot.minor,
        snapshot.build,
        snapshot.revision,
        snapshot.product_type,
        snapshot.architecture
    );
    Ok(snapshot)
}

fn apply_legacy(snapshot: &mut VersionSnapshot, legacy: &OsVersionInfo) {
    snapshot.major = legacy.major;
    snapshot.minor = legacy.minor;
    snapshot.build = match snapshot.platform {
        // The high word repeats major.minor on 9x
        PlatformFamily::Win9x => legacy.build & 0xFFFF,
        _ => legacy.build,
    };
    snapshot.csd_version = legacy.csd_version.clone();
    if legacy.extended {
        snapshot.service_pack_major = legacy.service_pack_major;
        snapshot.service_pack_minor = legacy.service_pack_minor;
        snapshot.suite_mask = SuiteMask::from_bits_truncate(legacy.suite_mask);
        snapshot.product_type = ProductType::from_raw(legacy.product_type);
    }
}

fn apply_probed(
    snapshot: &mut VersionSnapshot,
    comparator: &Comparator<'_>,
    legacy: &OsVersionInfo,
    limit: u32,
) {
    match probe_version(comparator, PROBE_START_MAJOR, limit) {
        Some(probed) => {
            snapshot.major = probed.major;
            snapshot.minor = probed.minor;
            snapshot.service_pack_major = probed.service_pack_major;
            snapshot.service_pack_minor = probed.service_pack_minor;
        }
        None => {
            log::warn!("Version probe inconclusive, falling back to legacy fields");
            apply_legacy(snapshot, legacy);
            return;
        }
    }

    snapshot.build = probe_build(comparator).unwrap_or(legacy.build);
    snapshot.csd_version = if snapshot.service_pack_major > 0 {
        format!("Service Pack {}", snapshot.service_pack_major)
    } else {
        String::new()
    };
    if legacy.extended {
        snapshot.suite_mask = SuiteMask::from_bits_truncate(legacy.suite_mask);
    }
    snapshot.product_type = comparator
        .product_type()
        .unwrap_or_else(|| ProductType::from_raw(legacy.product_type));
}

/// Determine (major, minor, sp major, sp minor) with "at least" queries only.
///
/// Each field is raised while the running version is still at least the next candidate,
/// then the next finer field starts from zero. `limit` bounds the increments per field.
/// Returns `None` if the comparator is unavailable or the host is below `start_major`.
pub fn probe_version(
    comparator: &Comparator<'_>,
    start_major: u32,
    limit: u32,
) -> Option<ProbedVersion> {
    let at_least = |major, minor, sp_major, sp_minor| {
        comparator.compare_version(major, minor, sp_major, sp_minor, Condition::GreaterEqual)
    };

    if !at_least(start_major, 0, 0, 0)? {
        return None;
    }

    let mut major = start_major;
    let mut steps = 0;
    while steps < limit && at_least(major + 1, 0, 0, 0)? {
        major += 1;
        steps += 1;
    }

    let mut minor = 0;
    steps = 0;
    while steps < limit && at_least(major, minor + 1, 0, 0)? {
        minor += 1;
        steps += 1;
    }

    let mut sp_major: u16 = 0;
    steps = 0;
    while steps < limit && sp_major < u16::MAX && at_least(major, minor, sp_major + 1, 0)? {
        sp_major += 1;
        steps += 1;
    }

    let mut sp_minor: u16 = 0;
    steps = 0;
    while steps < limit && sp_minor < u16::MAX && at_least(major, minor, sp_major, sp_minor + 1)?
    {
        sp_minor += 1;
        steps += 1;
    }

    log::debug!("Probed version {major}.{minor} sp{sp_major}.{sp_minor}");
    Some(ProbedVersion {
        major,
        minor,
        service_pack_major: sp_major,
        service_pack_minor: sp_minor,
    })
}

/// Largest build number `b` for which "build >= b" holds, by bisection.
pub fn probe_build(comparator: &Comparator<'_>) -> Option<u32> {
    let mut low: u32 = 0;
    let mut high: u32 = u32::MAX;
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if comparator.compare_build(Condition::GreaterEqual, mid)? {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    log::debug!("Probed build {low}");
    Some(low)
}

fn acquire_architecture(api: &dyn NativeApi) -> ProcessorArchitecture {
    let info = api.native_system_info().unwrap_or_else(|| {
        log::debug!("Native system info unavailable, using process view");
        api.system_info()
    });
    ProcessorArchitecture::from_raw(info.processor_architecture)
}
