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

//! Boundary to the host platform.
//!
//! Everything the rest of the crate knows about the running system passes through the
//! [`NativeApi`] and [`RegistryReader`] traits. The Windows implementations live in
//! [`windows`] and [`registry`]; other hosts only get the in-memory registry, which is
//! enough to classify captured snapshots.

pub mod constants;
pub mod registry;
#[cfg(windows)]
pub mod windows;

pub use registry::{InMemoryRegistry, RegistryReader, RegistryValue};
#[cfg(windows)]
pub use registry::WindowsRegistry;
#[cfg(windows)]
pub use windows::WindowsApi;

/// Fields returned by the legacy `GetVersionEx` call. May be altered by compatibility shims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsVersionInfo {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub platform_id: u32,
    pub csd_version: String,
    /// False when only the basic structure could be filled (NT 4 before SP6, 9x);
    /// the service pack, suite and product type fields are then meaningless.
    pub extended: bool,
    pub service_pack_major: u16,
    pub service_pack_minor: u16,
    pub suite_mask: u16,
    pub product_type: u8,
}

/// Reference values handed to the version verifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionRequest {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub service_pack_major: u16,
    pub service_pack_minor: u16,
    pub product_type: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub processor_architecture: u16,
    pub number_of_processors: u32,
}

/// Native version and system-information primitives.
pub trait NativeApi: Send + Sync {
    /// Legacy, spoofable version call.
    fn basic_version_info(&self) -> Option<OsVersionInfo>;

    /// True when both the condition-mask constructor and the verifier were resolved.
    fn has_version_verifier(&self) -> bool;

    /// Add `condition` for the field selected by `type_mask` to `condition_mask`.
    fn set_condition_mask(&self, condition_mask: u64, type_mask: u32, condition: u8) -> u64;

    /// Evaluate `request` against the running system inside the kernel.
    fn verify_version_info(
        &self,
        request: &VersionRequest,
        type_mask: u32,
        condition_mask: u64,
    ) -> bool;

    /// Architecture as seen from outside any translation layer, when supported.
    fn native_system_info(&self) -> Option<SystemInfo>;

    /// Architecture as seen by the calling process.
    fn system_info(&self) -> SystemInfo;

    /// Numeric edition code (Vista and later).
    fn product_info(&self, major: u32, minor: u32, sp_major: u16, sp_minor: u16)
    -> Option<u32>;

    fn system_metric(&self, index: i32) -> i32;
}


#[cfg(test)]
pub use mock::MockNativeApi;
