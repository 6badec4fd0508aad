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

use crate::error::{Result, SysverError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "sysver";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "SYSVER";
const DEFAULT_PROBE_LIMIT: u32 = 256;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysverConfig {
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// Never use the verifier; report what the legacy version call says.
    #[serde(default)]
    pub force_legacy: bool,

    /// Maximum increments per version field while probing.
    #[serde(default = "default_probe_limit")]
    pub probe_limit: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            force_legacy: false,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }
}

fn default_probe_limit() -> u32 {
    DEFAULT_PROBE_LIMIT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Read the 64-bit registry view from 32-bit processes.
    #[serde(default = "default_use_64bit_view")]
    pub use_64bit_view: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            use_64bit_view: true,
        }
    }
}

fn default_use_64bit_view() -> bool {
    true
}

impl SysverConfig {
    /// Default location of the configuration file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, then `SYSVER_*` environment variables.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::load_layers(None),
        }
    }

    /// Load from `path` (a missing file is fine), then `SYSVER_*` environment variables.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layers(Some(path))
    }

    fn load_layers(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&SysverConfig::default())
            .map_err(|e| SysverError::ConfigError(format!("Invalid defaults: {e}")))?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            if path.exists() {
                log::debug!("Loading config from {path:?}");
            } else {
                log::debug!("Config file not found at {path:?}, using defaults");
            }
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SysverError::ConfigError(format!("Failed to load config: {e}")))?;
        settings
            .try_deserialize()
            .map_err(|e| SysverError::ConfigError(format!("Failed to parse config: {e}")))
    }
}
