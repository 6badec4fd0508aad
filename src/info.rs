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

//! The public query surface.
//!
//! An [`OsInfo`] is captured once and never changes. Queries either read the captured
//! snapshot (legacy, spoofable) or go through the comparator (spoof-immune), falling
//! back to the snapshot when the comparator is unavailable.

use crate::acquisition::acquire;
use crate::classify::{Classification, classify, classify_snapshot};
use crate::comparator::{Comparator, Condition};
use crate::config::{AcquisitionConfig, SysverConfig};
use crate::error::{Result, SysverError};
use crate::models::{
    FeatureUpdate, OsProduct, PlatformFamily, ProcessorArchitecture, ProductLine, ProductType,
    VersionSnapshot,
};
use crate::platform::constants::{
    BUILD_BRANCH_VALUE, DIGITAL_PRODUCT_ID_VALUE, EDITION_ID_VALUE, INSTALL_DATE_VALUE,
    NT_CURRENT_VERSION_KEY, PRODUCT_ID_VALUE, REGISTERED_ORGANIZATION_VALUE,
    REGISTERED_OWNER_VALUE, WIN9X_CURRENT_VERSION_KEY,
};
use crate::platform::registry::{read_binary, read_string, read_u32};
use crate::platform::{InMemoryRegistry, NativeApi, RegistryReader};
use crate::product_key::{KeyEncoding, decode_product_key};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Releases with a named "or greater" predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedVersion {
    WindowsXp,
    WindowsXpSp1,
    WindowsXpSp2,
    WindowsXpSp3,
    WindowsVista,
    WindowsVistaSp1,
    WindowsVistaSp2,
    Windows7,
    Windows7Sp1,
    Windows8,
    Windows8Point1,
    Windows10,
}

impl NamedVersion {
    /// (major, minor, service pack major)
    pub fn version(self) -> (u32, u32, u16) {
        match self {
            NamedVersion::WindowsXp => (5, 1, 0),
            NamedVersion::WindowsXpSp1 => (5, 1, 1),
            NamedVersion::WindowsXpSp2 => (5, 1, 2),
            NamedVersion::WindowsXpSp3 => (5, 1, 3),
            NamedVersion::WindowsVista => (6, 0, 0),
            NamedVersion::WindowsVistaSp1 => (6, 0, 1),
            NamedVersion::WindowsVistaSp2 => (6, 0, 2),
            NamedVersion::Windows7 => (6, 1, 0),
            NamedVersion::Windows7Sp1 => (6, 1, 1),
            NamedVersion::Windows8 => (6, 2, 0),
            NamedVersion::Windows8Point1 => (6, 3, 0),
            NamedVersion::Windows10 => (10, 0, 0),
        }
    }
}

/// Serialisable summary of an [`OsInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsReport {
    pub platform: PlatformFamily,
    pub product: OsProduct,
    pub product_name: String,
    pub edition: Option<String>,
    pub release_label: Option<String>,
    pub feature_update: FeatureUpdate,
    pub feature_update_name: String,
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
    pub service_pack: Option<String>,
    pub architecture: ProcessorArchitecture,
    pub is_server: bool,
    pub is_64bit: bool,
    pub comparator_available: bool,
    pub description: String,
}

/// Immutable operating system information, captured once.
pub struct OsInfo {
    snapshot: VersionSnapshot,
    classification: Classification,
    product_type: ProductType,
    api: Option<Arc<dyn NativeApi>>,
    registry: Arc<dyn RegistryReader>,
}

impl OsInfo {
    /// Detect the running system using the layered user configuration.
    pub fn detect() -> Result<Self> {
        let config = SysverConfig::load()?;
        Self::detect_with(&config)
    }

    #[cfg(windows)]
    pub fn detect_with(config: &SysverConfig) -> Result<Self> {
        use crate::platform::{WindowsApi, WindowsRegistry};

        let api: Arc<dyn NativeApi> = Arc::new(WindowsApi::new());
        let registry: Arc<dyn RegistryReader> =
            Arc::new(WindowsRegistry::new(config.registry.use_64bit_view));
        Self::from_sources(api, registry, &config.acquisition)
    }

    #[cfg(not(windows))]
    pub fn detect_with(_config: &SysverConfig) -> Result<Self> {
        Err(SysverError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }

    /// The process-wide instance, detected on first use.
    pub fn current() -> Result<&'static OsInfo> {
        static CURRENT: OnceLock<OsInfo> = OnceLock::new();

        if let Some(info) = CURRENT.get() {
            return Ok(info);
        }
        let detected = Self::detect()?;
        Ok(CURRENT.get_or_init(|| detected))
    }

    /// Acquire and classify through the given native API and registry.
    pub fn from_sources(
        api: Arc<dyn NativeApi>,
        registry: Arc<dyn RegistryReader>,
        config: &AcquisitionConfig,
    ) -> Result<Self> {
        let snapshot = acquire(api.as_ref(), registry.as_ref(), config)?;
        let (classification, product_type) = {
            let comparator = Comparator::new(api.as_ref(), snapshot.comparator_available);
            (
                classify(&snapshot, &comparator),
                comparator.product_type().unwrap_or(snapshot.product_type),
            )
        };

        Ok(Self {
            snapshot,
            classification,
            product_type,
            api: Some(api),
            registry,
        })
    }

    /// Classify a previously captured snapshot. No native calls are ever made.
    pub fn from_snapshot(snapshot: VersionSnapshot) -> Self {
        Self::from_snapshot_with_registry(snapshot, Arc::new(InMemoryRegistry::new()))
    }

    pub fn from_snapshot_with_registry(
        snapshot: VersionSnapshot,
        registry: Arc<dyn RegistryReader>,
    ) -> Self {
        let classification = classify_snapshot(&snapshot);
        Self {
            product_type: snapshot.product_type,
            snapshot,
            classification,
            api: None,
            registry,
        }
    }

    /// Comparator over the captured native API, unavailable for offline snapshots.
    pub fn comparator(&self) -> Comparator<'_> {
        match &self.api {
            Some(api) => Comparator::new(api.as_ref(), self.snapshot.comparator_available),
            None => Comparator::unavailable(),
        }
    }

    pub fn snapshot(&self) -> &VersionSnapshot {
        &self.snapshot
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn platform(&self) -> PlatformFamily {
        self.snapshot.platform
    }

    pub fn product(&self) -> OsProduct {
        self.classification.product
    }

    pub fn product_name(&self) -> &str {
        &self.classification.product_name
    }

    pub fn edition(&self) -> Option<&str> {
        self.classification.edition.as_deref()
    }

    pub fn release_label(&self) -> Option<&str> {
        self.classification.release_label.as_deref()
    }

    pub fn feature_update(&self) -> FeatureUpdate {
        self.classification.feature_update
    }

    /// e.g. "Windows 11 Version 23H2", or "Unknown" / "N/A" for the sentinels.
    pub fn feature_update_name(&self) -> String {
        self.classification.feature_update.to_string()
    }

    pub fn major(&self) -> u32 {
        self.snapshot.major
    }

    pub fn minor(&self) -> u32 {
        self.snapshot.minor
    }

    pub fn build(&self) -> u32 {
        self.snapshot.build
    }

    pub fn revision(&self) -> u32 {
        self.snapshot.revision
    }

    pub fn service_pack(&self) -> Option<&str> {
        self.classification.service_pack.as_deref()
    }

    pub fn service_pack_major(&self) -> u16 {
        self.snapshot.service_pack_major
    }

    pub fn service_pack_minor(&self) -> u16 {
        self.snapshot.service_pack_minor
    }

    pub fn architecture(&self) -> ProcessorArchitecture {
        self.snapshot.architecture
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn is_server(&self) -> bool {
        self.product_type.is_server()
    }

    pub fn is_64bit(&self) -> bool {
        self.snapshot.architecture.is_64bit()
    }

    pub fn comparator_available(&self) -> bool {
        self.snapshot.comparator_available
    }

    /// True when the legacy call reported a version the verifier disagrees with, i.e. the
    /// process runs under a compatibility shim.
    ///
    /// On the legacy path the captured fields came from the possibly shimmed call, so the
    /// verifier is asked whether they match exactly, service pack included.
    pub fn is_compatibility_mode(&self) -> bool {
        let snapshot = &self.snapshot;
        if !snapshot.comparator_available || snapshot.reported_major == 0 {
            return false;
        }
        if (snapshot.reported_major, snapshot.reported_minor) != (snapshot.major, snapshot.minor)
        {
            return true;
        }
        self.comparator().compare_version(
            snapshot.major,
            snapshot.minor,
            snapshot.service_pack_major,
            snapshot.service_pack_minor,
            Condition::Equal,
        ) == Some(false)
    }

    /// Is the reported version at least (major, minor, service pack)?
    ///
    /// Reads the captured legacy fields, which a compatibility shim may have altered.
    pub fn is_win_version_or_greater(&self, major: u32, minor: u32, sp_major: u16) -> bool {
        (
            self.snapshot.major,
            self.snapshot.minor,
            self.snapshot.service_pack_major,
        ) >= (major, minor, sp_major)
    }

    /// Is the real version at least (major, minor, service pack)?
    ///
    /// Asks the verifier, so compatibility shims are ignored. Without a verifier this
    /// degrades to [`OsInfo::is_win_version_or_greater`].
    pub fn is_really_version_or_greater(&self, major: u32, minor: u32, sp_major: u16) -> bool {
        self.comparator()
            .compare_version(major, minor, sp_major, 0, Condition::GreaterEqual)
            .unwrap_or_else(|| self.is_win_version_or_greater(major, minor, sp_major))
    }

    pub fn is_named_version_or_greater(&self, version: NamedVersion) -> bool {
        let (major, minor, sp_major) = version.version();
        self.is_win_version_or_greater(major, minor, sp_major)
    }

    pub fn is_really_named_version_or_greater(&self, version: NamedVersion) -> bool {
        let (major, minor, sp_major) = version.version();
        self.is_really_version_or_greater(major, minor, sp_major)
    }

    pub fn is_windows_xp_or_greater(&self) -> bool {
        self.is_named_version_or_greater(NamedVersion::WindowsXp)
    }

    pub fn is_windows_vista_or_greater(&self) -> bool {
        self.is_named_version_or_greater(NamedVersion::WindowsVista)
    }

    pub fn is_windows7_or_greater(&self) -> bool {
        self.is_named_version_or_greater(NamedVersion::Windows7)
    }

    pub fn is_windows8_or_greater(&self) -> bool {
        self.is_named_version_or_greater(NamedVersion::Windows8)
    }

    pub fn is_windows8_point1_or_greater(&self) -> bool {
        self.is_named_version_or_greater(NamedVersion::Windows8Point1)
    }

    pub fn is_windows10_or_greater(&self) -> bool {
        self.is_named_version_or_greater(NamedVersion::Windows10)
    }

    pub fn is_really_windows_xp_or_greater(&self) -> bool {
        self.is_really_named_version_or_greater(NamedVersion::WindowsXp)
    }

    pub fn is_really_windows_vista_or_greater(&self) -> bool {
        self.is_really_named_version_or_greater(NamedVersion::WindowsVista)
    }

    pub fn is_really_windows7_or_greater(&self) -> bool {
        self.is_really_named_version_or_greater(NamedVersion::Windows7)
    }

    pub fn is_really_windows8_or_greater(&self) -> bool {
        self.is_really_named_version_or_greater(NamedVersion::Windows8)
    }

    pub fn is_really_windows8_point1_or_greater(&self) -> bool {
        self.is_really_named_version_or_greater(NamedVersion::Windows8Point1)
    }

    pub fn is_really_windows10_or_greater(&self) -> bool {
        self.is_really_named_version_or_greater(NamedVersion::Windows10)
    }

    /// Is this Windows 10 `update` or later? Any Windows 11 build counts as later.
    ///
    /// Fails for identifiers that are not Windows 10 feature updates.
    pub fn is_windows10_version_or_greater(&self, update: FeatureUpdate) -> Result<bool> {
        self.is_feature_update_or_greater(update, ProductLine::Windows10)
    }

    /// Is this Windows 11 `update` or later?
    ///
    /// Fails for identifiers that are not Windows 11 feature updates.
    pub fn is_windows11_version_or_greater(&self, update: FeatureUpdate) -> Result<bool> {
        self.is_feature_update_or_greater(update, ProductLine::Windows11)
    }

    fn is_feature_update_or_greater(
        &self,
        update: FeatureUpdate,
        line: ProductLine,
    ) -> Result<bool> {
        let build = match (update.line(), update.release_build()) {
            (Some(update_line), Some(build)) if update_line == line => build,
            _ => {
                return Err(SysverError::InvalidFeatureUpdate {
                    requested: format!("{update:?}"),
                    line,
                });
            }
        };

        if !self.is_really_version_or_greater(10, 0, 0) {
            return Ok(false);
        }
        Ok(self
            .comparator()
            .compare_build(Condition::GreaterEqual, build)
            .unwrap_or(self.snapshot.build >= build))
    }

    fn current_version_key(&self) -> &'static str {
        match self.snapshot.platform {
            PlatformFamily::Nt => NT_CURRENT_VERSION_KEY,
            PlatformFamily::Win9x | PlatformFamily::Win32s => WIN9X_CURRENT_VERSION_KEY,
        }
    }

    fn read_current_version_string(&self, name: &str) -> Result<String> {
        read_string(self.registry.as_ref(), self.current_version_key(), name)
    }

    pub fn edition_id(&self) -> Result<String> {
        self.read_current_version_string(EDITION_ID_VALUE)
    }

    pub fn build_branch(&self) -> Result<String> {
        self.read_current_version_string(BUILD_BRANCH_VALUE)
    }

    pub fn registered_owner(&self) -> Result<String> {
        self.read_current_version_string(REGISTERED_OWNER_VALUE)
    }

    pub fn registered_organization(&self) -> Result<String> {
        self.read_current_version_string(REGISTERED_ORGANIZATION_VALUE)
    }

    pub fn product_id(&self) -> Result<String> {
        self.read_current_version_string(PRODUCT_ID_VALUE)
    }

    /// Installation time, `None` when the value is absent or zero.
    pub fn install_date(&self) -> Result<Option<DateTime<Utc>>> {
        let seconds = read_u32(
            self.registry.as_ref(),
            self.current_version_key(),
            INSTALL_DATE_VALUE,
        )?;
        if seconds == 0 {
            return Ok(None);
        }
        Ok(DateTime::from_timestamp(i64::from(seconds), 0))
    }

    pub fn digital_product_id(&self) -> Result<Vec<u8>> {
        read_binary(
            self.registry.as_ref(),
            self.current_version_key(),
            DIGITAL_PRODUCT_ID_VALUE,
        )
    }

    /// Product key decoded from the digital product id, empty when unavailable.
    pub fn product_key(&self) -> Result<String> {
        let encoding = match self
            .comparator()
            .compare_version(6, 2, 0, 0, Condition::GreaterEqual)
        {
            Some(true) => KeyEncoding::Windows8,
            Some(false) => KeyEncoding::Legacy,
            None => KeyEncoding::for_version(self.snapshot.major, self.snapshot.minor),
        };
        Ok(decode_product_key(&self.digital_product_id()?, encoding))
    }

    /// One line summary, e.g. "Windows 10 Professional Version 22H2 (10.0.19045.2000, x64)".
    pub fn description(&self) -> String {
        let mut parts = vec![self.product_name().to_string()];
        parts.extend(self.edition().map(str::to_string));
        parts.extend(self.service_pack().map(str::to_string));
        parts.extend(self.release_label().map(str::to_string));

        let mut version = format!("{}.{}.{}", self.major(), self.minor(), self.build());
        if self.revision() != 0 {
            version.push_str(&format!(".{}", self.revision()));
        }
        format!("{} ({version}, {})", parts.join(" "), self.architecture())
    }

    pub fn report(&self) -> OsReport {
        OsReport {
            platform: self.platform(),
            product: self.product(),
            product_name: self.product_name().to_string(),
            edition: self.edition().map(str::to_string),
            release_label: self.release_label().map(str::to_string),
            feature_update: self.feature_update(),
            feature_update_name: self.feature_update_name(),
            major: self.major(),
            minor: self.minor(),
            build: self.build(),
            revision: self.revision(),
            service_pack: self.service_pack().map(str::to_string),
            architecture: self.architecture(),
            is_server: self.is_server(),
            is_64bit: self.is_64bit(),
            comparator_available: self.comparator_available(),
            description: self.description(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }
}

impl fmt::Display for OsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl fmt::Debug for OsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsInfo")
            .field("snapshot", &self.snapshot)
            .field("classification", &self.classification)
            .field("product_type", &self.product_type)
            .finish_non_exhaustive()
    }
}
