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

pub mod acquisition;
pub mod classify;
pub mod comparator;
pub mod config;
pub mod error;
pub mod info;
pub mod logging;
pub mod models;
pub mod platform;
pub mod product_key;

pub use classify::{Classification, classify, classify_snapshot};
pub use comparator::{Comparator, Condition};
pub use config::SysverConfig;
pub use error::{Result, SysverError};
pub use info::{NamedVersion, OsInfo, OsReport};
pub use models::{
    FeatureUpdate, OsProduct, PlatformFamily, ProcessorArchitecture, ProductLine, ProductType,
    VersionSnapshot,
};
