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

//! Compiled-in build tables for version 10.0.
//!
//! Lookups run in a fixed order: plain release builds, then builds whose meaning depends
//! on the revision, then preview channel lists. Several preview builds share numbers
//! with later releases, so the channel lists must only be consulted last.

use crate::models::{FeatureUpdate, OsProduct};

/// First build of the newer product line. Anything at or above it belongs to that line,
/// even where an older-line build was released later.
pub const WIN11_FIRST_BUILD: u32 = 21996;

/// One named release sharing a build number with others, told apart by revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildNameEntry {
    pub build: u32,
    pub revision_low: u32,
    /// Inclusive.
    pub revision_high: u32,
    pub label: &'static str,
    pub feature_update: FeatureUpdate,
}

impl BuildNameEntry {
    const fn release(build: u32, label: &'static str, feature_update: FeatureUpdate) -> Self {
        Self::revisions(build, 0, u32::MAX, label, feature_update)
    }

    const fn revisions(
        build: u32,
        revision_low: u32,
        revision_high: u32,
        label: &'static str,
        feature_update: FeatureUpdate,
    ) -> Self {
        Self {
            build,
            revision_low,
            revision_high,
            label,
            feature_update,
        }
    }

    pub fn matches(&self, build: u32, revision: u32) -> bool {
        self.build == build && (self.revision_low..=self.revision_high).contains(&revision)
    }
}

use FeatureUpdate::*;

/// Workstation releases whose build number alone identifies them.
pub const WORKSTATION_RELEASES: &[BuildNameEntry] = &[
    BuildNameEntry::release(10240, "Version 1507", Win10V1507),
    BuildNameEntry::release(10586, "Version 1511", Win10V1511),
    BuildNameEntry::release(14393, "Version 1607", Win10V1607),
    BuildNameEntry::release(15063, "Version 1703", Win10V1703),
    BuildNameEntry::release(16299, "Version 1709", Win10V1709),
    BuildNameEntry::release(17134, "Version 1803", Win10V1803),
    BuildNameEntry::release(17763, "Version 1809", Win10V1809),
    BuildNameEntry::release(18362, "Version 1903", Win10V1903),
    BuildNameEntry::release(18363, "Version 1909", Win10V1909),
];

/// Workstation builds shared between a release and the previews leading up to it.
pub const WORKSTATION_REVISION_RELEASES: &[BuildNameEntry] = &[
    BuildNameEntry::revisions(19041, 1, 263, "Version 2004 [Release Preview Channel]", Win10V2004),
    BuildNameEntry::revisions(19041, 264, u32::MAX, "Version 2004", Win10V2004),
    BuildNameEntry::revisions(
        19042,
        330,
        571,
        "Version 20H2 [Beta & Release Preview Channels]",
        Win10V20H2,
    ),
    BuildNameEntry::revisions(19042, 572, u32::MAX, "Version 20H2", Win10V20H2),
    BuildNameEntry::revisions(
        19043,
        844,
        927,
        "Version 21H1 [Beta & Release Preview Channels]",
        Win10V21H1,
    ),
    BuildNameEntry::revisions(19043, 928, u32::MAX, "Version 21H1", Win10V21H1),
    BuildNameEntry::revisions(
        19044,
        1147,
        1287,
        "Version 21H2 [Release Preview Channel]",
        Win10V21H2,
    ),
    BuildNameEntry::revisions(19044, 1288, u32::MAX, "Version 21H2", Win10V21H2),
    BuildNameEntry::revisions(
        19045,
        1706,
        1888,
        "Version 22H2 [Release Preview Channel]",
        Win10V22H2,
    ),
    BuildNameEntry::revisions(19045, 1889, u32::MAX, "Version 22H2", Win10V22H2),
    BuildNameEntry::revisions(
        22000,
        51,
        193,
        "Version 21H2 [Beta & Release Preview Channels]",
        Win11V21H2,
    ),
    BuildNameEntry::revisions(22000, 194, u32::MAX, "Version 21H2", Win11V21H2),
    BuildNameEntry::revisions(
        22621,
        1,
        520,
        "Version 22H2 [Beta & Release Preview Channels]",
        Win11V22H2,
    ),
    BuildNameEntry::revisions(22621, 521, u32::MAX, "Version 22H2", Win11V22H2),
    BuildNameEntry::revisions(
        22631,
        2129,
        2427,
        "Version 23H2 [Release Preview Channel]",
        Win11V23H2,
    ),
    BuildNameEntry::revisions(22631, 2428, u32::MAX, "Version 23H2", Win11V23H2),
    BuildNameEntry::revisions(
        26100,
        712,
        1741,
        "Version 24H2 [Release Preview Channel]",
        Win11V24H2,
    ),
    BuildNameEntry::revisions(26100, 1742, u32::MAX, "Version 24H2", Win11V24H2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewChannel {
    /// Windows 10 Insider Preview rings before the channel model.
    InsiderPreview,
    Dev,
    Beta,
    Canary,
}

impl PreviewChannel {
    pub fn label(self) -> &'static str {
        match self {
            PreviewChannel::InsiderPreview => "Insider Preview",
            PreviewChannel::Dev => "Dev Channel",
            PreviewChannel::Beta => "Beta Channel",
            PreviewChannel::Canary => "Canary Channel",
        }
    }
}

pub struct ChannelBuilds {
    pub channel: PreviewChannel,
    pub builds: &'static [u32],
}

const WIN10_INSIDER_BUILDS: &[u32] = &[
    9841, 9860, 9879, 9926, 10041, 10049, 10061, 10074, 10122, 10130, 10158, 10159, 10162, 10166,
    10525, 10532, 10547, 10565, 10576, 11082, 11099, 11102, 14251, 14257, 14271, 14279, 14291,
    14295, 14316, 14328, 14332, 14342, 14352, 14361, 14366, 14367, 14371, 14372, 14376, 14901,
    14905, 14915, 14926, 14931, 14936, 14942, 14946, 14951, 14955, 14959, 14965, 14971, 14986,
    15002, 15007, 15014, 15019, 15025, 15031, 15042, 15046, 15048, 15055, 15058, 15060, 15061,
    16170, 16176, 16179, 16184, 16188, 16193, 16199, 16212, 16215, 16226, 16232, 16237, 16241,
    16251, 16257, 16273, 16275, 16278, 16281, 16288, 16291, 16294, 16296, 17004, 17017, 17025,
    17035, 17040, 17046, 17063, 17074, 17083, 17093, 17101, 17107, 17110, 17112, 17115, 17120,
    17123, 17127, 17128, 17133, 17604, 17618, 17623, 17627, 17634, 17639, 17643, 17650, 17655,
    17661, 17666, 17677, 17682, 17686, 17692, 17704, 17711, 17713, 17723, 17728, 17730, 17733,
    17735, 17738, 17741, 17744, 17746, 17751, 17754, 18204, 18237, 18242, 18252, 18262, 18267,
    18272, 18277, 18282, 18290, 18298, 18305, 18309, 18312, 18317, 18323, 18329, 18334, 18342,
    18343, 18346, 18348, 18351, 18353, 18356, 18358, 18361, 18836, 18841, 18845, 18850, 18855,
    18860, 18865, 18875, 18885, 18890, 18894, 18895, 18898, 18908, 18912, 18917, 18922, 18932,
    18936, 18941, 18945, 18950, 18956, 18963, 18970, 18975, 18980, 18985, 18990, 18995, 18999,
    19002, 19008, 19013, 19018, 19023, 19025, 19028, 19030, 19033, 19035, 19037,
];

const DEV_CHANNEL_BUILDS: &[u32] = &[
    20150, 20161, 20170, 20175, 20180, 20185, 20190, 20197, 20201, 20206, 20211, 20215, 20226,
    20231, 20236, 20241, 20246, 20251, 20257, 20262, 20270, 20277, 20279, 21277, 21286, 21292,
    21296, 21301, 21313, 21318, 21322, 21327, 21332, 21337, 21343, 21354, 21359, 21364, 21370,
    21376, 21382, 21387, 21390, 21996, 22449, 22454, 22458, 22463, 22468, 22471, 22478, 22483,
    22489, 22494, 22499, 22504, 22509, 22518, 22523, 22526, 22533, 22538, 22543, 22557, 22563,
    22567, 22572, 22579, 22581, 22593, 22598, 22610, 22616, 23403, 23419, 23424, 23430, 23435,
    23440, 23446, 23451, 23456, 23463, 23466, 23475, 23481, 23493, 23506, 23511, 23516, 23521,
    23526, 23531, 23536, 23541, 23545, 23550, 23555, 23560, 23565, 23570, 23575, 23580, 23585,
    23590, 23595, 23601, 23606, 23612, 23615, 23619, 23620, 23627, 26120, 26200,
];

const BETA_CHANNEL_BUILDS: &[u32] = &[22622, 22623, 22624, 22625, 22635];

// 26100 was a Canary build before it became 24H2; only revisions outside the release
// ranges above reach this list.
const CANARY_CHANNEL_BUILDS: &[u32] = &[
    25314, 25324, 25330, 25336, 25341, 25346, 25352, 25357, 25366, 25370, 25375, 25381, 25387,
    25393, 25905, 25915, 25921, 25926, 25931, 25936, 25941, 25947, 25951, 25967, 25977, 25982,
    25987, 25992, 26002, 26010, 26016, 26020, 26040, 26047, 26052, 26058, 26063, 26080, 26085,
    26090, 26100, 26212, 26217, 26227, 26257, 27686, 27695, 27718, 27723, 27729, 27744, 27754,
    27758, 27764, 27766, 27774, 27783, 27788, 27802, 27808, 27813, 27818, 27823,
];

/// Preview channel lists in lookup order.
pub const PREVIEW_CHANNELS: &[ChannelBuilds] = &[
    ChannelBuilds {
        channel: PreviewChannel::InsiderPreview,
        builds: WIN10_INSIDER_BUILDS,
    },
    ChannelBuilds {
        channel: PreviewChannel::Dev,
        builds: DEV_CHANNEL_BUILDS,
    },
    ChannelBuilds {
        channel: PreviewChannel::Beta,
        builds: BETA_CHANNEL_BUILDS,
    },
    ChannelBuilds {
        channel: PreviewChannel::Canary,
        builds: CANARY_CHANNEL_BUILDS,
    },
];

/// A server release, named independently of its workstation counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerRelease {
    pub build: u32,
    pub product: OsProduct,
    pub label: &'static str,
}

pub const SERVER_RELEASES: &[ServerRelease] = &[
    ServerRelease {
        build: 14393,
        product: OsProduct::WinSvr2016,
        label: "Version 1607",
    },
    ServerRelease {
        build: 16299,
        product: OsProduct::WinServer,
        label: "Version 1709",
    },
    ServerRelease {
        build: 17134,
        product: OsProduct::WinServer,
        label: "Version 1803",
    },
    ServerRelease {
        build: 17763,
        product: OsProduct::WinSvr2019,
        label: "Version 1809",
    },
    ServerRelease {
        build: 18362,
        product: OsProduct::WinServer,
        label: "Version 1903",
    },
    ServerRelease {
        build: 18363,
        product: OsProduct::WinServer,
        label: "Version 1909",
    },
    ServerRelease {
        build: 19041,
        product: OsProduct::WinServer,
        label: "Version 2004",
    },
    ServerRelease {
        build: 19042,
        product: OsProduct::WinServer,
        label: "Version 20H2",
    },
    ServerRelease {
        build: 20348,
        product: OsProduct::WinSvr2022,
        label: "Version 21H2",
    },
    ServerRelease {
        build: 25398,
        product: OsProduct::WinServer,
        label: "Version 23H2",
    },
    ServerRelease {
        build: 26100,
        product: OsProduct::WinSvr2025,
        label: "Version 24H2",
    },
];

pub const SERVER_INSIDER_BUILDS: &[u32] = &[
    16237, 16257, 16278, 17035, 17074, 17093, 17115, 17623, 17650, 17666, 17692, 17709, 17723,
    17733, 17744, 18836, 18855, 18875, 18885, 20201, 20206, 20221, 20257, 20282, 20285, 20295,
    20303, 20308, 20317, 20324, 20344, 25057, 25066, 25075, 25099, 25110, 25120, 25131, 25136,
    25142, 25158, 25169, 25179, 25182, 25236, 25246, 25951, 25967, 25977, 25997, 26010, 26040,
    26063, 26080, 26085,
];

pub fn find_workstation_release(build: u32) -> Option<&'static BuildNameEntry> {
    WORKSTATION_RELEASES.iter().find(|entry| entry.build == build)
}

pub fn find_workstation_revision(build: u32, revision: u32) -> Option<&'static BuildNameEntry> {
    WORKSTATION_REVISION_RELEASES
        .iter()
        .find(|entry| entry.matches(build, revision))
}

pub fn find_preview_channel(build: u32) -> Option<PreviewChannel> {
    PREVIEW_CHANNELS
        .iter()
        .find(|list| list.builds.contains(&build))
        .map(|list| list.channel)
}

pub fn find_server_release(build: u32) -> Option<&'static ServerRelease> {
    SERVER_RELEASES.iter().find(|release| release.build == build)
}

pub fn is_server_insider_build(build: u32) -> bool {
    SERVER_INSIDER_BUILDS.contains(&build)
}
