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

/// Snapshot fixtures captured from real hosts, stored as TOML
use std::fs;
use std::path::PathBuf;
use sysver::VersionSnapshot;

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{name}.toml"))
}

/// Loads `tests/fixtures/<name>.toml` as a snapshot
#[allow(dead_code)]
pub fn load_snapshot(name: &str) -> VersionSnapshot {
    let contents = fs::read_to_string(fixture_path(name)).unwrap();
    VersionSnapshot::from_toml(&contents).unwrap()
}
