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
use std::cmp::Ordering;

/// The two product lines that both report version 10.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    Windows10,
    Windows11,
}

impl std::fmt::Display for ProductLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductLine::Windows10 => write!(f, "Windows 10"),
            ProductLine::Windows11 => write!(f, "Windows 11"),
        }
    }
}

/// A named Windows 10 / Windows 11 feature update.
///
/// Members are ordered within their product line by release. Every Windows 11 member
/// compares greater than every Windows 10 member, even where a Windows 10 update was
/// released after an early Windows 11 one. The two sentinels have no ordering at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureUpdate {
    /// The product predates feature updates (or is a server release).
    NotApplicable,
    /// A version 10.0 build that matches no compiled-in release.
    Unknown,
    Win10V1507,
    Win10V1511,
    Win10V1607,
    Win10V1703,
    Win10V1709,
    Win10V1803,
    Win10V1809,
    Win10V1903,
    Win10V1909,
    Win10V2004,
    Win10V20H2,
    Win10V21H1,
    Win10V21H2,
    Win10V22H2,
    Win11V21H2,
    Win11V22H2,
    Win11V23H2,
    Win11V24H2,
}

use FeatureUpdate::*;

const WIN10_UPDATES: &[FeatureUpdate] = &[
    Win10V1507, Win10V1511, Win10V1607, Win10V1703, Win10V1709, Win10V1803, Win10V1809,
    Win10V1903, Win10V1909, Win10V2004, Win10V20H2, Win10V21H1, Win10V21H2, Win10V22H2,
];

const WIN11_UPDATES: &[FeatureUpdate] = &[Win11V21H2, Win11V22H2, Win11V23H2, Win11V24H2];

impl FeatureUpdate {
    pub fn line(self) -> Option<ProductLine> {
        if WIN10_UPDATES.contains(&self) {
            Some(ProductLine::Windows10)
        } else if WIN11_UPDATES.contains(&self) {
            Some(ProductLine::Windows11)
        } else {
            None
        }
    }

    /// All members of a product line in release order.
    pub fn members(line: ProductLine) -> &'static [FeatureUpdate] {
        match line {
            ProductLine::Windows10 => WIN10_UPDATES,
            ProductLine::Windows11 => WIN11_UPDATES,
        }
    }

    pub fn is_sentinel(self) -> bool {
        self.line().is_none()
    }

    /// Short version name, e.g. "1607" or "22H2".
    pub fn name(self) -> &'static str {
        match self {
            NotApplicable => "N/A",
            Unknown => "Unknown",
            Win10V1507 => "1507",
            Win10V1511 => "1511",
            Win10V1607 => "1607",
            Win10V1703 => "1703",
            Win10V1709 => "1709",
            Win10V1803 => "1803",
            Win10V1809 => "1809",
            Win10V1903 => "1903",
            Win10V1909 => "1909",
            Win10V2004 => "2004",
            Win10V20H2 => "20H2",
            Win10V21H1 => "21H1",
            Win10V21H2 => "21H2",
            Win10V22H2 => "22H2",
            Win11V21H2 => "21H2",
            Win11V22H2 => "22H2",
            Win11V23H2 => "23H2",
            Win11V24H2 => "24H2",
        }
    }

    /// Build number of the general-availability release.
    pub fn release_build(self) -> Option<u32> {
        let build = match self {
            NotApplicable | Unknown => return None,
            Win10V1507 => 10240,
            Win10V1511 => 10586,
            Win10V1607 => 14393,
            Win10V1703 => 15063,
            Win10V1709 => 16299,
            Win10V1803 => 17134,
            Win10V1809 => 17763,
            Win10V1903 => 18362,
            Win10V1909 => 18363,
            Win10V2004 => 19041,
            Win10V20H2 => 19042,
            Win10V21H1 => 19043,
            Win10V21H2 => 19044,
            Win10V22H2 => 19045,
            Win11V21H2 => 22000,
            Win11V22H2 => 22621,
            Win11V23H2 => 22631,
            Win11V24H2 => 26100,
        };
        Some(build)
    }

    fn rank(self) -> Option<(ProductLine, usize)> {
        let line = self.line()?;
        let index = Self::members(line).iter().position(|u| *u == self)?;
        Some((line, index))
    }
}

impl PartialOrd for FeatureUpdate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        // Lines compare first, so the newer line always wins
        Some(self.rank()?.cmp(&other.rank()?))
    }
}

impl std::fmt::Display for FeatureUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line() {
            Some(line) => write!(f, "{line} Version {}", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}
