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

//! Native constants shared by the Windows bindings and the comparator.

// VerifyVersionInfo type mask bits
pub const VER_MINORVERSION: u32 = 0x0000_0001;
pub const VER_MAJORVERSION: u32 = 0x0000_0002;
pub const VER_BUILDNUMBER: u32 = 0x0000_0004;
pub const VER_SERVICEPACKMINOR: u32 = 0x0000_0010;
pub const VER_SERVICEPACKMAJOR: u32 = 0x0000_0020;
pub const VER_PRODUCT_TYPE: u32 = 0x0000_0080;

// GetSystemMetrics indices
pub const SM_TABLETPC: i32 = 86;
pub const SM_MEDIACENTER: i32 = 87;
pub const SM_STARTER: i32 = 88;
pub const SM_SERVERR2: i32 = 89;

// Registry locations, all under HKEY_LOCAL_MACHINE
pub const NT_CURRENT_VERSION_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion";
pub const WIN9X_CURRENT_VERSION_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion";
pub const PRODUCT_OPTIONS_KEY: &str = r"SYSTEM\CurrentControlSet\Control\ProductOptions";

pub const EDITION_ID_VALUE: &str = "EditionID";
pub const BUILD_BRANCH_VALUE: &str = "BuildBranch";
pub const REGISTERED_OWNER_VALUE: &str = "RegisteredOwner";
pub const REGISTERED_ORGANIZATION_VALUE: &str = "RegisteredOrganization";
pub const INSTALL_DATE_VALUE: &str = "InstallDate";
pub const PRODUCT_ID_VALUE: &str = "ProductId";
pub const DIGITAL_PRODUCT_ID_VALUE: &str = "DigitalProductId";
pub const UPDATE_REVISION_VALUE: &str = "UBR";
pub const PRODUCT_TYPE_VALUE: &str = "ProductType";
