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

//! Turns a [`VersionSnapshot`] into a product, edition and feature-update classification.
//!
//! Classification is total: every snapshot yields a result, with explicit unknown
//! products and labels standing in for anything the compiled-in tables do not cover.
//! The comparator, when available, overrides the spoofable product type and decides
//! which product line a 10.0 build belongs to.

pub mod edition;
pub mod product_codes;
pub mod tables;

use crate::comparator::{Comparator, Condition};
use crate::models::{
    FeatureUpdate, OsProduct, PlatformFamily, ProcessorArchitecture, ProductLine, ProductType,
    VersionSnapshot,
};
use serde::Serialize;
use tables::WIN11_FIRST_BUILD;

pub use edition::resolve_edition;
pub use product_codes::edition_for_code;
pub use tables::{BuildNameEntry, PreviewChannel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub platform: PlatformFamily,
    pub product: OsProduct,
    /// Display name, e.g. "Windows 11" or "Windows NT 4.0".
    pub product_name: String,
    pub edition: Option<String>,
    /// Feature update / channel label, e.g. "Version 22H2 [Release Preview Channel]".
    pub release_label: Option<String>,
    pub service_pack: Option<String>,
    pub feature_update: FeatureUpdate,
}

struct Coarse {
    product: OsProduct,
    product_name: Option<String>,
    release_label: Option<String>,
    feature_update: FeatureUpdate,
}

impl Coarse {
    fn product(product: OsProduct) -> Self {
        Self {
            product,
            product_name: None,
            release_label: None,
            feature_update: FeatureUpdate::NotApplicable,
        }
    }

    fn named(product: OsProduct, name: String) -> Self {
        Self {
            product_name: Some(name),
            ..Self::product(product)
        }
    }

    fn labelled(product: OsProduct, label: String, feature_update: FeatureUpdate) -> Self {
        Self {
            product,
            product_name: None,
            release_label: Some(label),
            feature_update,
        }
    }
}

/// Classify a snapshot, consulting `comparator` where it can see past compatibility shims.
pub fn classify(snapshot: &VersionSnapshot, comparator: &Comparator<'_>) -> Classification {
    let product_type = comparator.product_type().unwrap_or(snapshot.product_type);

    let coarse = match snapshot.platform {
        PlatformFamily::Win9x => Coarse::product(classify_win9x(snapshot)),
        PlatformFamily::Win32s => Coarse::product(OsProduct::UnknownWin32s),
        PlatformFamily::Nt => classify_nt(snapshot, comparator, product_type),
    };

    let edition = resolve_edition(snapshot, coarse.product, product_type);
    let classification = Classification {
        platform: snapshot.platform,
        product: coarse.product,
        product_name: coarse
            .product_name
            .unwrap_or_else(|| coarse.product.name().to_string()),
        edition,
        release_label: coarse.release_label,
        service_pack: service_pack(snapshot),
        feature_update: coarse.feature_update,
    };

    log::debug!(
        "Classified {}.{}.{}.{} as {:?} ({:?})",
        snapshot.major,
        snapshot.minor,
        snapshot.build,
        snapshot.revision,
        classification.product,
        classification.feature_update
    );
    classification
}

/// Classify using the snapshot fields alone.
pub fn classify_snapshot(snapshot: &VersionSnapshot) -> Classification {
    classify(snapshot, &Comparator::unavailable())
}

fn classify_win9x(snapshot: &VersionSnapshot) -> OsProduct {
    match (snapshot.major, snapshot.minor) {
        (4, 0) => OsProduct::Win95,
        (4, 10) => OsProduct::Win98,
        (4, 90) => OsProduct::WinMe,
        _ => OsProduct::UnknownWin9x,
    }
}

fn classify_nt(
    snapshot: &VersionSnapshot,
    comparator: &Comparator<'_>,
    product_type: ProductType,
) -> Coarse {
    let server = product_type.is_server();
    let pick = |workstation, server_product| {
        Coarse::product(if server { server_product } else { workstation })
    };

    match (snapshot.major, snapshot.minor) {
        (0..=2, _) => Coarse::product(OsProduct::UnknownWinNt),
        (major @ 3..=4, minor) => {
            Coarse::named(OsProduct::WinNt, format!("Windows NT {major}.{minor}"))
        }
        (5, 0) => Coarse::product(OsProduct::Win2K),
        (5, 1) => Coarse::product(OsProduct::WinXp),
        (5, 2) => {
            if !server && snapshot.architecture == ProcessorArchitecture::X64 {
                Coarse::product(OsProduct::WinXp)
            } else if snapshot.aux.server_r2 {
                Coarse::product(OsProduct::WinSvr2003R2)
            } else {
                Coarse::product(OsProduct::WinSvr2003)
            }
        }
        (6, 0) => pick(OsProduct::WinVista, OsProduct::WinSvr2008),
        (6, 1) => pick(OsProduct::Win7, OsProduct::WinSvr2008R2),
        (6, 2) => pick(OsProduct::Win8, OsProduct::WinSvr2012),
        (6, 3) => pick(OsProduct::Win8Point1, OsProduct::WinSvr2012R2),
        // Early Windows 10 previews still reported 6.4
        (6, 4) => Coarse::labelled(
            if server {
                OsProduct::WinServer
            } else {
                OsProduct::Win10
            },
            "Technical Preview".to_string(),
            FeatureUpdate::Unknown,
        ),
        (10, 0) if server => classify_server_10(snapshot),
        (10, 0) => classify_workstation_10(snapshot, comparator),
        (major, minor) => {
            Coarse::named(OsProduct::WinLater, format!("Windows Version {major}.{minor}"))
        }
    }
}

fn unknown_release_label(snapshot: &VersionSnapshot) -> String {
    format!(
        "Unknown release v10.0.{}.{}",
        snapshot.build, snapshot.revision
    )
}

fn classify_workstation_10(snapshot: &VersionSnapshot, comparator: &Comparator<'_>) -> Coarse {
    let build = snapshot.build;
    let revision = snapshot.revision;

    let newer_line = comparator
        .compare_build(Condition::GreaterEqual, WIN11_FIRST_BUILD)
        .unwrap_or(build >= WIN11_FIRST_BUILD);
    let (product, line) = if newer_line {
        (OsProduct::Win11, ProductLine::Windows11)
    } else {
        (OsProduct::Win10, ProductLine::Windows10)
    };

    // A zero build means acquisition failed; never match it against the tables
    if build == 0 {
        return Coarse::labelled(product, unknown_release_label(snapshot), FeatureUpdate::Unknown);
    }

    // The captured build may come from a shimmed call; a live verifier must confirm it
    let build_confirmed = comparator
        .compare_build(Condition::Equal, build)
        .unwrap_or(true);
    if !build_confirmed {
        log::debug!("Build {build} not confirmed by the verifier, skipping release tables");
        return Coarse::labelled(product, unknown_release_label(snapshot), FeatureUpdate::Unknown);
    }

    if let Some(entry) = tables::find_workstation_release(build)
        .or_else(|| tables::find_workstation_revision(build, revision))
        .filter(|entry| entry.feature_update.line() == Some(line))
    {
        return Coarse::labelled(product, entry.label.to_string(), entry.feature_update);
    }

    if let Some(channel) = tables::find_preview_channel(build) {
        return Coarse::labelled(
            product,
            format!("{} v10.0.{build}.{revision}", channel.label()),
            FeatureUpdate::Unknown,
        );
    }

    Coarse::labelled(product, unknown_release_label(snapshot), FeatureUpdate::Unknown)
}

fn classify_server_10(snapshot: &VersionSnapshot) -> Coarse {
    let build = snapshot.build;

    if build != 0 {
        if let Some(release) = tables::find_server_release(build) {
            return Coarse::labelled(
                release.product,
                release.label.to_string(),
                FeatureUpdate::NotApplicable,
            );
        }
        if tables::is_server_insider_build(build) {
            return Coarse::labelled(
                OsProduct::WinServer,
                format!("Insider Preview Build {build}"),
                FeatureUpdate::Unknown,
            );
        }
    }

    Coarse::labelled(
        OsProduct::WinServer,
        unknown_release_label(snapshot),
        FeatureUpdate::Unknown,
    )
}

/// Service pack description: the NT CSD string, or the Windows 95 / 98 refresh name.
pub fn service_pack(snapshot: &VersionSnapshot) -> Option<String> {
    let csd = snapshot.csd_version.trim();
    match snapshot.platform {
        PlatformFamily::Nt => (!csd.is_empty()).then(|| csd.to_string()),
        PlatformFamily::Win9x => {
            let letter = csd.chars().next()?.to_ascii_uppercase();
            match (snapshot.minor, letter) {
                (0, 'B' | 'C') => Some("OSR2".to_string()),
                (10, 'A') => Some("SE".to_string()),
                _ => None,
            }
        }
        PlatformFamily::Win32s => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuxiliaryFlags, SuiteMask};
    use crate::platform::MockNativeApi;
    use regex::Regex;

    fn workstation(build: u32, revision: u32) -> VersionSnapshot {
        VersionSnapshot::nt(10, 0, build)
            .with_revision(revision)
            .with_product_type(ProductType::Workstation)
    }

    fn server(build: u32) -> VersionSnapshot {
        VersionSnapshot::nt(10, 0, build).with_product_type(ProductType::Server)
    }

    #[test]
    fn test_win10_22h2() {
        let result = classify_snapshot(&workstation(19045, 2000));
        assert_eq!(result.product, OsProduct::Win10);
        assert_eq!(result.feature_update, FeatureUpdate::Win10V22H2);
        assert_eq!(result.release_label.as_deref(), Some("Version 22H2"));
        assert_eq!(result.product_name, "Windows 10");
    }

    #[test]
    fn test_revision_ranges_pick_their_label() {
        let preview = classify_snapshot(&workstation(19045, 1706));
        assert_eq!(
            preview.release_label.as_deref(),
            Some("Version 22H2 [Release Preview Channel]")
        );
        assert_eq!(preview.feature_update, FeatureUpdate::Win10V22H2);

        let outside = classify_snapshot(&workstation(19045, 42));
        assert_eq!(
            outside.release_label.as_deref(),
            Some("Unknown release v10.0.19045.42")
        );
        assert_eq!(outside.feature_update, FeatureUpdate::Unknown);
        assert_eq!(outside.product, OsProduct::Win10);
    }

    #[test]
    fn test_simple_release_ignores_revision() {
        let result = classify_snapshot(&workstation(17763, 0));
        assert_eq!(result.feature_update, FeatureUpdate::Win10V1809);
        assert_eq!(result.release_label.as_deref(), Some("Version 1809"));
    }

    #[test]
    fn test_win11_releases() {
        let result = classify_snapshot(&workstation(22631, 4460));
        assert_eq!(result.product, OsProduct::Win11);
        assert_eq!(result.feature_update, FeatureUpdate::Win11V23H2);

        let result = classify_snapshot(&workstation(26100, 2314));
        assert_eq!(result.feature_update, FeatureUpdate::Win11V24H2);
    }

    #[test]
    fn test_preview_channels_are_checked_after_release_tables() {
        // 26100 is also listed as a Canary build
        let canary = classify_snapshot(&workstation(26100, 1));
        assert_eq!(canary.product, OsProduct::Win11);
        assert_eq!(canary.feature_update, FeatureUpdate::Unknown);
        assert_eq!(
            canary.release_label.as_deref(),
            Some("Canary Channel v10.0.26100.1")
        );

        let beta = classify_snapshot(&workstation(22635, 4515));
        assert_eq!(
            beta.release_label.as_deref(),
            Some("Beta Channel v10.0.22635.4515")
        );

        let insider = classify_snapshot(&workstation(10041, 0));
        assert_eq!(insider.product, OsProduct::Win10);
        assert_eq!(
            insider.release_label.as_deref(),
            Some("Insider Preview v10.0.10041.0")
        );
    }

    #[test]
    fn test_cutoff_decides_line_for_unknown_builds() {
        let pattern = Regex::new(r"^Unknown release v10\.0\.\d+\.\d+$").unwrap();

        let older = classify_snapshot(&workstation(19999, 1));
        assert_eq!(older.product, OsProduct::Win10);
        assert!(pattern.is_match(older.release_label.as_deref().unwrap()));

        let newer = classify_snapshot(&workstation(WIN11_FIRST_BUILD, 1));
        assert_eq!(newer.product, OsProduct::Win11);

        let future = classify_snapshot(&workstation(30000, 7));
        assert_eq!(future.product, OsProduct::Win11);
        assert_eq!(future.feature_update, FeatureUpdate::Unknown);
        assert!(pattern.is_match(future.release_label.as_deref().unwrap()));
    }

    #[test]
    fn test_zero_build_never_matches_tables() {
        for snapshot in [workstation(0, 0), workstation(0, 2000), server(0)] {
            let result = classify_snapshot(&snapshot);
            assert_eq!(result.feature_update, FeatureUpdate::Unknown);
            assert!(
                result
                    .release_label
                    .as_deref()
                    .unwrap()
                    .starts_with("Unknown release v10.0.0.")
            );
        }
    }

    #[test]
    fn test_server_10_releases() {
        let result = classify_snapshot(&server(17763));
        assert_eq!(result.product, OsProduct::WinSvr2019);
        assert_eq!(result.feature_update, FeatureUpdate::NotApplicable);

        let result = classify_snapshot(&server(20348));
        assert_eq!(result.product, OsProduct::WinSvr2022);

        let result = classify_snapshot(&server(26100));
        assert_eq!(result.product, OsProduct::WinSvr2025);
        assert_eq!(result.release_label.as_deref(), Some("Version 24H2"));

        let sac = classify_snapshot(&server(19042));
        assert_eq!(sac.product, OsProduct::WinServer);
        assert_eq!(sac.release_label.as_deref(), Some("Version 20H2"));
    }

    #[test]
    fn test_server_insider_and_unknown() {
        let insider = classify_snapshot(&server(25099));
        assert_eq!(insider.product, OsProduct::WinServer);
        assert_eq!(
            insider.release_label.as_deref(),
            Some("Insider Preview Build 25099")
        );
        assert_eq!(insider.feature_update, FeatureUpdate::Unknown);

        let unknown = classify_snapshot(&server(22000).with_revision(5));
        assert_eq!(unknown.product, OsProduct::WinServer);
        assert_eq!(
            unknown.release_label.as_deref(),
            Some("Unknown release v10.0.22000.5")
        );
    }

    #[test]
    fn test_domain_controller_is_server() {
        let dc = VersionSnapshot::nt(10, 0, 17763).with_product_type(ProductType::DomainController);
        assert_eq!(classify_snapshot(&dc).product, OsProduct::WinSvr2019);
    }

    #[test]
    fn test_six_x_generations() {
        let cases = [
            (0, OsProduct::WinVista, OsProduct::WinSvr2008),
            (1, OsProduct::Win7, OsProduct::WinSvr2008R2),
            (2, OsProduct::Win8, OsProduct::WinSvr2012),
            (3, OsProduct::Win8Point1, OsProduct::WinSvr2012R2),
        ];
        for (minor, workstation, server) in cases {
            let snapshot = VersionSnapshot::nt(6, minor, 9200);
            assert_eq!(
                classify_snapshot(&snapshot.clone().with_product_type(ProductType::Workstation))
                    .product,
                workstation
            );
            assert_eq!(
                classify_snapshot(&snapshot.with_product_type(ProductType::Server)).product,
                server
            );
        }
    }

    #[test]
    fn test_server_2008_r2_ignores_suite_mask() {
        for bits in [0u16, 0x0002, 0x0080, 0x0400, 0xFFFF] {
            let snapshot = VersionSnapshot::nt(6, 1, 7601)
                .with_product_type(ProductType::Server)
                .with_suite_mask(SuiteMask::from_bits_truncate(bits));
            assert_eq!(classify_snapshot(&snapshot).product, OsProduct::WinSvr2008R2);
        }
    }

    #[test]
    fn test_technical_preview() {
        let result = classify_snapshot(
            &VersionSnapshot::nt(6, 4, 9841).with_product_type(ProductType::Workstation),
        );
        assert_eq!(result.product, OsProduct::Win10);
        assert_eq!(result.release_label.as_deref(), Some("Technical Preview"));

        let result =
            classify_snapshot(
                &VersionSnapshot::nt(6, 4, 9841).with_product_type(ProductType::Server),
            );
        assert_eq!(result.product, OsProduct::WinServer);
    }

    #[test]
    fn test_major_five() {
        assert_eq!(
            classify_snapshot(&VersionSnapshot::nt(5, 0, 2195)).product,
            OsProduct::Win2K
        );
        assert_eq!(
            classify_snapshot(&VersionSnapshot::nt(5, 1, 2600)).product,
            OsProduct::WinXp
        );

        let base = VersionSnapshot::nt(5, 2, 3790).with_product_type(ProductType::Server);
        assert_eq!(classify_snapshot(&base).product, OsProduct::WinSvr2003);

        let mut r2 = base.clone();
        r2.aux = AuxiliaryFlags {
            server_r2: true,
            ..Default::default()
        };
        assert_eq!(classify_snapshot(&r2).product, OsProduct::WinSvr2003R2);

        let xp64 = VersionSnapshot::nt(5, 2, 3790)
            .with_product_type(ProductType::Workstation)
            .with_architecture(ProcessorArchitecture::X64);
        let result = classify_snapshot(&xp64);
        assert_eq!(result.product, OsProduct::WinXp);
        assert_eq!(result.edition.as_deref(), Some("Professional x64 Edition"));
    }

    #[test]
    fn test_legacy_and_later_names_embed_version() {
        let nt4 = classify_snapshot(&VersionSnapshot::nt(4, 0, 1381));
        assert_eq!(nt4.product, OsProduct::WinNt);
        assert_eq!(nt4.product_name, "Windows NT 4.0");

        let nt351 = classify_snapshot(&VersionSnapshot::nt(3, 51, 1057));
        assert_eq!(nt351.product_name, "Windows NT 3.51");

        let later = classify_snapshot(&VersionSnapshot::nt(11, 2, 1));
        assert_eq!(later.product, OsProduct::WinLater);
        assert_eq!(later.product_name, "Windows Version 11.2");

        let odd = classify_snapshot(&VersionSnapshot::nt(6, 9, 1));
        assert_eq!(odd.product, OsProduct::WinLater);

        let ancient = classify_snapshot(&VersionSnapshot::nt(1, 0, 0));
        assert_eq!(ancient.product, OsProduct::UnknownWinNt);
    }

    #[test]
    fn test_win9x_family() {
        let products: Vec<_> = [0, 10, 90, 95]
            .into_iter()
            .map(|minor| classify_snapshot(&VersionSnapshot::win9x(minor, 950)).product)
            .collect();
        assert_eq!(
            products,
            vec![
                OsProduct::Win95,
                OsProduct::Win98,
                OsProduct::WinMe,
                OsProduct::UnknownWin9x
            ]
        );

        let mut five = VersionSnapshot::win9x(0, 950);
        five.major = 5;
        assert_eq!(classify_snapshot(&five).product, OsProduct::UnknownWin9x);
    }

    #[test]
    fn test_win32s() {
        let snapshot = VersionSnapshot {
            platform: PlatformFamily::Win32s,
            major: 3,
            minor: 10,
            ..Default::default()
        };
        let result = classify_snapshot(&snapshot);
        assert_eq!(result.product, OsProduct::UnknownWin32s);
        assert_eq!(result.edition, None);
    }

    #[test]
    fn test_service_pack_strings() {
        let sp = VersionSnapshot::nt(5, 1, 2600).with_service_pack(3, 0, "Service Pack 3");
        assert_eq!(service_pack(&sp).as_deref(), Some("Service Pack 3"));
        assert_eq!(service_pack(&VersionSnapshot::nt(5, 1, 2600)), None);

        let osr2 = VersionSnapshot::win9x(0, 1111).with_service_pack(0, 0, " C");
        assert_eq!(service_pack(&osr2).as_deref(), Some("OSR2"));
        let se = VersionSnapshot::win9x(10, 2222).with_service_pack(0, 0, " A ");
        assert_eq!(service_pack(&se).as_deref(), Some("SE"));
        let plain = VersionSnapshot::win9x(10, 1998).with_service_pack(0, 0, "");
        assert_eq!(service_pack(&plain), None);
    }

    #[test]
    fn test_comparator_overrides_spoofed_product_type() {
        let mut api = MockNativeApi::new();
        api.expect_has_version_verifier().return_const(true);
        api.expect_set_condition_mask()
            .returning(|mask, type_mask, condition| {
                mask | ((condition as u64) << (type_mask.trailing_zeros() * 3))
            });
        api.expect_verify_version_info()
            .returning(|request, type_mask, _| {
                type_mask == crate::platform::constants::VER_PRODUCT_TYPE
                    && request.product_type == ProductType::VER_NT_SERVER
            });
        let comparator = Comparator::new(&api, true);

        let snapshot = VersionSnapshot::nt(6, 1, 7601).with_product_type(ProductType::Workstation);
        assert_eq!(classify(&snapshot, &comparator).product, OsProduct::WinSvr2008R2);
    }

    /// Verifier for a workstation kernel at `real_build`; the mask carries the condition.
    fn build_verifier(real_build: u32) -> MockNativeApi {
        let mut api = MockNativeApi::new();
        api.expect_has_version_verifier().return_const(true);
        api.expect_set_condition_mask()
            .returning(|mask, _, condition| mask | u64::from(condition));
        api.expect_verify_version_info()
            .returning(move |request, type_mask, mask| {
                let Some(condition) = Condition::from_raw((mask & 0x7) as u8) else {
                    return false;
                };
                match type_mask {
                    crate::platform::constants::VER_BUILDNUMBER => {
                        condition.holds(real_build.cmp(&request.build))
                    }
                    crate::platform::constants::VER_PRODUCT_TYPE => {
                        request.product_type == ProductType::VER_NT_WORKSTATION
                    }
                    _ => false,
                }
            });
        api
    }

    #[test]
    fn test_comparator_decides_product_line() {
        // Real build 22631 behind a shim reporting 19045
        let api = build_verifier(22631);
        let comparator = Comparator::new(&api, true);

        let result = classify(&workstation(19045, 2000), &comparator);
        assert_eq!(result.product, OsProduct::Win11);
        assert_eq!(result.feature_update, FeatureUpdate::Unknown);
        assert_eq!(
            result.release_label.as_deref(),
            Some("Unknown release v10.0.19045.2000")
        );
    }

    #[test]
    fn test_confirmed_build_uses_tables() {
        let api = build_verifier(22631);
        let comparator = Comparator::new(&api, true);

        let result = classify(&workstation(22631, 2500), &comparator);
        assert_eq!(result.product, OsProduct::Win11);
        assert_eq!(result.feature_update, FeatureUpdate::Win11V23H2);
        assert_eq!(result.release_label.as_deref(), Some("Version 23H2"));
    }

    #[test]
    fn test_feature_update_stays_in_product_line() {
        // A verifier that agrees with every build query
        let mut api = MockNativeApi::new();
        api.expect_has_version_verifier().return_const(true);
        api.expect_set_condition_mask().returning(|mask, _, _| mask);
        api.expect_verify_version_info().return_const(true);
        let comparator = Comparator::new(&api, true);

        let result = classify(&workstation(19045, 2000), &comparator);
        assert_eq!(result.product, OsProduct::Win11);
        assert_eq!(result.feature_update, FeatureUpdate::Unknown);
        assert!(result.feature_update.line().is_none());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let snapshots = [
            workstation(19045, 2000),
            workstation(26100, 1),
            server(0),
            VersionSnapshot::win9x(90, 3000),
            VersionSnapshot::nt(u32::MAX, u32::MAX, u32::MAX).with_revision(u32::MAX),
        ];
        for snapshot in &snapshots {
            assert_eq!(classify_snapshot(snapshot), classify_snapshot(snapshot));
        }
    }
}
