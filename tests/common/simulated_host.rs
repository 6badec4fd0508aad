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

//! A fake host whose legacy version call can lie while its verifier tells the truth.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use sysver::Condition;
use sysver::platform::constants::{
    VER_BUILDNUMBER, VER_MAJORVERSION, VER_MINORVERSION, VER_PRODUCT_TYPE, VER_SERVICEPACKMAJOR,
    VER_SERVICEPACKMINOR,
};
use sysver::platform::{NativeApi, OsVersionInfo, SystemInfo, VersionRequest};

#[allow(dead_code)]
pub const ARCH_X86: u16 = 0;
#[allow(dead_code)]
pub const ARCH_X64: u16 = 9;
#[allow(dead_code)]
pub const ARCH_ARM64: u16 = 12;

pub const WORKSTATION: u8 = 1;
pub const SERVER: u8 = 3;

/// What the kernel knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub sp_major: u16,
    pub sp_minor: u16,
    pub product_type: u8,
}

#[allow(dead_code)]
pub struct SimulatedHost {
    pub real: RealVersion,
    /// What the (possibly shimmed) legacy call reports.
    pub reported: Option<OsVersionInfo>,
    pub verifier: bool,
    pub native_architecture: Option<u16>,
    pub process_architecture: u16,
    pub product_info: Option<u32>,
    pub metrics: HashMap<i32, i32>,
    verify_calls: AtomicUsize,
    mask_calls: AtomicUsize,
}

#[allow(dead_code)]
impl SimulatedHost {
    /// An honest NT host with a working verifier.
    pub fn nt(major: u32, minor: u32, build: u32) -> Self {
        let real = RealVersion {
            major,
            minor,
            build,
            product_type: WORKSTATION,
            ..Default::default()
        };
        Self {
            real,
            reported: Some(OsVersionInfo {
                major,
                minor,
                build,
                platform_id: 2,
                extended: true,
                product_type: WORKSTATION,
                ..Default::default()
            }),
            verifier: true,
            native_architecture: Some(ARCH_X64),
            process_architecture: ARCH_X64,
            product_info: None,
            metrics: HashMap::new(),
            verify_calls: AtomicUsize::new(0),
            mask_calls: AtomicUsize::new(0),
        }
    }

    pub fn win9x(minor: u32, build: u32, csd: &str) -> Self {
        let mut host = Self::nt(4, minor, build).without_verifier();
        host.reported = Some(OsVersionInfo {
            major: 4,
            minor,
            // 9x repeats major.minor in the high word
            build: (4 << 24) | (minor << 16) | build,
            platform_id: 1,
            csd_version: csd.to_string(),
            ..Default::default()
        });
        host.native_architecture = None;
        host.process_architecture = ARCH_X86;
        host
    }

    /// Make the legacy call report a different version, the way a compatibility shim does.
    pub fn shimmed_as(mut self, major: u32, minor: u32, build: u32) -> Self {
        if let Some(reported) = self.reported.as_mut() {
            reported.major = major;
            reported.minor = minor;
            reported.build = build;
        }
        self
    }

    pub fn with_service_pack(mut self, major: u16, minor: u16) -> Self {
        self.real.sp_major = major;
        self.real.sp_minor = minor;
        if let Some(reported) = self.reported.as_mut() {
            reported.service_pack_major = major;
            reported.service_pack_minor = minor;
            reported.csd_version = format!("Service Pack {major}");
        }
        self
    }

    pub fn server(mut self) -> Self {
        self.real.product_type = SERVER;
        if let Some(reported) = self.reported.as_mut() {
            reported.product_type = SERVER;
        }
        self
    }

    pub fn without_verifier(mut self) -> Self {
        self.verifier = false;
        self
    }

    pub fn with_product_info(mut self, code: u32) -> Self {
        self.product_info = Some(code);
        self
    }

    pub fn with_architecture(mut self, native: Option<u16>, process: u16) -> Self {
        self.native_architecture = native;
        self.process_architecture = process;
        self
    }

    pub fn with_metric(mut self, index: i32, value: i32) -> Self {
        self.metrics.insert(index, value);
        self
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn mask_calls(&self) -> usize {
        self.mask_calls.load(AtomicOrdering::SeqCst)
    }

    fn condition(mask: u64, field: u32) -> Option<Condition> {
        Condition::from_raw(((mask >> (field.trailing_zeros() * 3)) & 0x7) as u8)
    }
}

impl NativeApi for SimulatedHost {
    fn basic_version_info(&self) -> Option<OsVersionInfo> {
        self.reported.clone()
    }

    fn has_version_verifier(&self) -> bool {
        self.verifier
    }

    fn set_condition_mask(&self, condition_mask: u64, type_mask: u32, condition: u8) -> u64 {
        self.mask_calls.fetch_add(1, AtomicOrdering::SeqCst);
        condition_mask | (u64::from(condition) << (type_mask.trailing_zeros() * 3))
    }

    /// Version fields compare hierarchically under the condition of the coarsest field
    /// present; the build and product type are independent terms.
    fn verify_version_info(
        &self,
        request: &VersionRequest,
        type_mask: u32,
        condition_mask: u64,
    ) -> bool {
        self.verify_calls.fetch_add(1, AtomicOrdering::SeqCst);
        assert!(self.verifier, "verifier called on a host without one");

        let real = self.real;
        let version_fields = [
            (VER_MAJORVERSION, real.major, request.major),
            (VER_MINORVERSION, real.minor, request.minor),
            (
                VER_SERVICEPACKMAJOR,
                u32::from(real.sp_major),
                u32::from(request.service_pack_major),
            ),
            (
                VER_SERVICEPACKMINOR,
                u32::from(real.sp_minor),
                u32::from(request.service_pack_minor),
            ),
        ];
        let present: Vec<_> = version_fields
            .iter()
            .filter(|(bit, _, _)| type_mask & bit != 0)
            .collect();

        if let Some((first_bit, _, _)) = present.first() {
            let Some(condition) = Self::condition(condition_mask, *first_bit) else {
                return false;
            };
            let ordering = present
                .iter()
                .map(|(_, actual, wanted)| actual.cmp(wanted))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal);
            if !condition.holds(ordering) {
                return false;
            }
        }

        if type_mask & VER_BUILDNUMBER != 0 {
            let Some(condition) = Self::condition(condition_mask, VER_BUILDNUMBER) else {
                return false;
            };
            if !condition.holds(real.build.cmp(&request.build)) {
                return false;
            }
        }

        if type_mask & VER_PRODUCT_TYPE != 0 {
            let Some(condition) = Self::condition(condition_mask, VER_PRODUCT_TYPE) else {
                return false;
            };
            if !condition.holds(real.product_type.cmp(&request.product_type)) {
                return false;
            }
        }

        true
    }

    fn native_system_info(&self) -> Option<SystemInfo> {
        self.native_architecture.map(|arch| SystemInfo {
            processor_architecture: arch,
            number_of_processors: 8,
        })
    }

    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            processor_architecture: self.process_architecture,
            number_of_processors: 8,
        }
    }

    fn product_info(
        &self,
        _major: u32,
        _minor: u32,
        _sp_major: u16,
        _sp_minor: u16,
    ) -> Option<u32> {
        self.product_info
    }

    fn system_metric(&self, index: i32) -> i32 {
        self.metrics.get(&index).copied().unwrap_or(0)
    }
}
