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

mod context;
mod format;

pub use context::ErrorContext;
pub use format::{format_error_chain, format_error_with_color};

use crate::models::ProductLine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SysverError {
    #[error(
        "Registry value '{value}' under '{key}' has an unexpected data type: expected \
         {expected}, found {found}"
    )]
    UnexpectedRegistryType {
        key: String,
        value: String,
        expected: &'static str,
        found: String,
    },

    #[error("Feature update '{requested}' is not a {line} feature update")]
    InvalidFeatureUpdate {
        requested: String,
        line: ProductLine,
    },

    #[error("Operating system detection is not supported on {0}")]
    UnsupportedPlatform(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SysverError>;
