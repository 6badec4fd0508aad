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

//! `GetProductInfo` product type codes and the edition names they map to.

/// (code, edition name), ascending by code.
const PRODUCT_EDITIONS: &[(u32, &str)] = &[
    (0x00000001, "Ultimate"),
    (0x00000002, "Home Basic"),
    (0x00000003, "Home Premium"),
    (0x00000004, "Enterprise"),
    (0x00000005, "Home Basic N"),
    (0x00000006, "Business"),
    (0x00000007, "Server Standard (full installation)"),
    (0x00000008, "Server Datacenter (full installation)"),
    (0x00000009, "Small Business Server"),
    (0x0000000A, "Server Enterprise (full installation)"),
    (0x0000000B, "Starter"),
    (0x0000000C, "Server Datacenter (core installation)"),
    (0x0000000D, "Server Standard (core installation)"),
    (0x0000000E, "Server Enterprise (core installation)"),
    (0x0000000F, "Server Enterprise for Itanium-based Systems"),
    (0x00000010, "Business N"),
    (0x00000011, "Web Server (full installation)"),
    (0x00000012, "HPC Edition"),
    (0x00000013, "Storage Server 2008 R2 Essentials"),
    (0x00000014, "Storage Server Express"),
    (0x00000015, "Storage Server Standard"),
    (0x00000016, "Storage Server Workgroup"),
    (0x00000017, "Storage Server Enterprise"),
    (0x00000018, "Server for Small Business Edition"),
    (0x00000019, "Small Business Server Premium"),
    (0x0000001A, "Home Premium N"),
    (0x0000001B, "Enterprise N"),
    (0x0000001C, "Ultimate N"),
    (0x0000001D, "Web Server (core installation)"),
    (0x0000001E, "Essential Business Server Management Server"),
    (0x0000001F, "Essential Business Server Security Server"),
    (0x00000020, "Essential Business Server Messaging Server"),
    (0x00000021, "Server Foundation"),
    (0x00000022, "Home Server 2011"),
    (0x00000023, "Server for SB Solutions without Hyper-V"),
    (0x00000024, "Server Standard without Hyper-V"),
    (0x00000025, "Server Datacenter without Hyper-V (full installation)"),
    (0x00000026, "Server Enterprise without Hyper-V (full installation)"),
    (0x00000027, "Server Datacenter without Hyper-V (core installation)"),
    (0x00000028, "Server Standard without Hyper-V (core installation)"),
    (0x00000029, "Server Enterprise without Hyper-V (core installation)"),
    (0x0000002A, "Hyper-V Server"),
    (0x0000002B, "Storage Server Express (core installation)"),
    (0x0000002C, "Storage Server Standard (core installation)"),
    (0x0000002D, "Storage Server Workgroup (core installation)"),
    (0x0000002E, "Storage Server Enterprise (core installation)"),
    (0x0000002F, "Starter N"),
    (0x00000030, "Professional"),
    (0x00000031, "Professional N"),
    (0x00000032, "Small Business Server 2011 Essentials"),
    (0x00000033, "Server for SB Solutions"),
    (0x00000034, "Server Solutions Premium"),
    (0x00000035, "Server Solutions Premium (core installation)"),
    (0x00000036, "Server for SB Solutions EM"),
    (0x00000037, "Server for SB Solutions EM"),
    (0x00000038, "MultiPoint Server"),
    (0x0000003B, "Essential Server Solution Management"),
    (0x0000003C, "Essential Server Solution Additional"),
    (0x0000003D, "Essential Server Solution Management without Hyper-V"),
    (0x0000003E, "Essential Server Solution Additional without Hyper-V"),
    (0x0000003F, "Small Business Server Premium (core installation)"),
    (0x00000040, "Server Hyper Core V"),
    (0x00000042, "Starter E"),
    (0x00000043, "Home Basic E"),
    (0x00000044, "Home Premium E"),
    (0x00000045, "Professional E"),
    (0x00000046, "Enterprise E"),
    (0x00000047, "Ultimate E"),
    (0x00000048, "Enterprise (evaluation)"),
    (0x0000004C, "MultiPoint Server Standard (full installation)"),
    (0x0000004D, "MultiPoint Server Premium (full installation)"),
    (0x0000004F, "Server Standard (evaluation)"),
    (0x00000050, "Server Datacenter (evaluation)"),
    (0x00000054, "Enterprise N (evaluation)"),
    (0x0000005F, "Storage Server Workgroup (evaluation)"),
    (0x00000060, "Storage Server Standard (evaluation)"),
    (0x00000062, "Home N"),
    (0x00000063, "Home China"),
    (0x00000064, "Home Single Language"),
    (0x00000065, "Home"),
    (0x00000067, "Professional with Media Center"),
    (0x00000068, "Mobile"),
    (0x00000079, "Education"),
    (0x0000007A, "Education N"),
    (0x0000007D, "Enterprise 2015 LTSB"),
    (0x0000007E, "Enterprise 2015 LTSB N"),
    (0x00000081, "Enterprise 2015 LTSB (evaluation)"),
    (0x00000082, "Enterprise 2015 LTSB N (evaluation)"),
    (0x00000085, "Mobile Enterprise"),
    (0x0000008A, "Holographic"),
    (0x0000008F, "Server Datacenter: Semi-Annual Channel (core installation)"),
    (0x00000091, "Server Datacenter: Semi-Annual Channel (core installation)"),
    (0x00000092, "Server Standard: Semi-Annual Channel (core installation)"),
    (0x000000A1, "Pro for Workstations"),
    (0x000000A2, "Pro for Workstations N"),
    (0x000000A4, "Pro Education"),
    (0x000000A5, "Pro Education N"),
    (0x000000AB, "Enterprise for Virtual Desktops"),
    (0x000000AF, "Enterprise multi-session"),
    (0x000000B2, "Pro Single Language"),
    (0x000000B3, "Pro China"),
    (0x000000B4, "Enterprise Subscription"),
    (0x000000B5, "Enterprise Subscription N"),
    (0x000000B7, "Enterprise G"),
    (0x000000B8, "Enterprise G N"),
    (0x000000BC, "IoT Enterprise"),
    (0x000000BF, "IoT Enterprise LTSC"),
    (0x000000C5, "Cloud"),
    (0x000000C6, "Cloud N"),
    (0x000000CA, "Cloud China"),
    (0x000000CB, "SE"),
    (0x000000D2, "Cloud Edition"),
    (0x00ABCDEF, "Unlicensed"),
];

pub const PRODUCT_UNDEFINED: u32 = 0;

/// Edition name for a product type code, `None` for undefined or unrecognised codes.
pub fn edition_for_code(code: u32) -> Option<&'static str> {
    PRODUCT_EDITIONS
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|index| PRODUCT_EDITIONS[index].1)
}
