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

//! Version comparisons that compatibility shims cannot intercept.
//!
//! Each query builds a condition mask through the native mask constructor and hands it
//! to the native verifier, which evaluates it against the real kernel version. When either
//! entry point is missing the comparator is unavailable and every query returns `None`;
//! callers then fall back to the (spoofable) snapshot fields.

use crate::models::ProductType;
use crate::platform::constants::{
    VER_BUILDNUMBER, VER_MAJORVERSION, VER_MINORVERSION, VER_PRODUCT_TYPE, VER_SERVICEPACKMAJOR,
    VER_SERVICEPACKMINOR,
};
use crate::platform::{NativeApi, VersionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Condition {
    /// Native `VER_*` condition code.
    pub fn raw(self) -> u8 {
        match self {
            Condition::Equal => 1,
            Condition::Greater => 2,
            Condition::GreaterEqual => 3,
            Condition::Less => 4,
            Condition::LessEqual => 5,
        }
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Condition::Equal),
            2 => Some(Condition::Greater),
            3 => Some(Condition::GreaterEqual),
            4 => Some(Condition::Less),
            5 => Some(Condition::LessEqual),
            _ => None,
        }
    }

    /// Apply the condition to an ordering of "actual" against "reference".
    pub fn holds(self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Condition::Equal => ordering == Equal,
            Condition::Greater => ordering == Greater,
            Condition::GreaterEqual => ordering != Less,
            Condition::Less => ordering == Less,
            Condition::LessEqual => ordering != Greater,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Comparator<'a> {
    api: Option<&'a dyn NativeApi>,
}

impl<'a> Comparator<'a> {
    /// Comparator over `api`, disabled unless `enabled` and both entry points resolved.
    pub fn new(api: &'a dyn NativeApi, enabled: bool) -> Self {
        let api = (enabled && api.has_version_verifier()).then_some(api);
        Self { api }
    }

    /// A comparator that answers nothing. Used for offline classification.
    pub fn unavailable() -> Self {
        Self { api: None }
    }

    pub fn is_available(&self) -> bool {
        self.api.is_some()
    }

    /// Is the running version `condition` (major, minor, sp_major, sp_minor)?
    ///
    /// Fields are compared hierarchically, major first.
    pub fn compare_version(
        &self,
        major: u32,
        minor: u32,
        sp_major: u16,
        sp_minor: u16,
        condition: Condition,
    ) -> Option<bool> {
        let api = self.api?;
        let request = VersionRequest {
            major,
            minor,
            service_pack_major: sp_major,
            service_pack_minor: sp_minor,
            ..Default::default()
        };
        let type_mask =
            VER_MAJORVERSION | VER_MINORVERSION | VER_SERVICEPACKMAJOR | VER_SERVICEPACKMINOR;
        let mut mask = 0;
        for field in [
            VER_MAJORVERSION,
            VER_MINORVERSION,
            VER_SERVICEPACKMAJOR,
            VER_SERVICEPACKMINOR,
        ] {
            mask = api.set_condition_mask(mask, field, condition.raw());
        }

        let result = api.verify_version_info(&request, type_mask, mask);
        log::trace!(
            "verify {major}.{minor} sp{sp_major}.{sp_minor} {condition:?} -> {result}"
        );
        Some(result)
    }

    pub fn compare_build(&self, condition: Condition, build: u32) -> Option<bool> {
        let api = self.api?;
        let request = VersionRequest {
            build,
            ..Default::default()
        };
        let mask = api.set_condition_mask(0, VER_BUILDNUMBER, condition.raw());

        let result = api.verify_version_info(&request, VER_BUILDNUMBER, mask);
        log::trace!("verify build {condition:?} {build} -> {result}");
        Some(result)
    }

    /// Does the product type field equal `product_type`?
    pub fn is_product_type(&self, product_type: ProductType) -> Option<bool> {
        let api = self.api?;
        let raw = product_type.raw()?;
        let request = VersionRequest {
            product_type: raw,
            ..Default::default()
        };
        let mask = api.set_condition_mask(0, VER_PRODUCT_TYPE, Condition::Equal.raw());

        Some(api.verify_version_info(&request, VER_PRODUCT_TYPE, mask))
    }

    /// Product type resolved through the verifier, `None` if unavailable or inconclusive.
    pub fn product_type(&self) -> Option<ProductType> {
        [
            ProductType::Workstation,
            ProductType::DomainController,
            ProductType::Server,
        ]
        .into_iter()
        .find(|candidate| self.is_product_type(*candidate) == Some(true))
    }
}

impl std::fmt::Debug for Comparator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("available", &self.is_available())
            .finish()
    }
}
