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

use crate::error::SysverError;
use crate::models::FeatureUpdate;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a SysverError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a SysverError) -> Self {
        let (suggestion, details) = match error {
            SysverError::UnexpectedRegistryType {
                key,
                value,
                expected,
                found,
            } => {
                let suggestion = Some(
                    "The registry value has been modified by another program or the system \
                     image is damaged. Inspect it with 'reg query'."
                        .to_string(),
                );
                let details = Some(format!(
                    "HKEY_LOCAL_MACHINE\\{key}\\{value} holds {found} data where {expected} \
                     was required."
                ));
                (suggestion, details)
            }
            SysverError::InvalidFeatureUpdate { requested, line } => {
                let names: Vec<&str> = FeatureUpdate::members(*line)
                    .iter()
                    .map(|update| update.name())
                    .collect();
                let suggestion = Some(format!(
                    "Pass one of the {line} feature updates: {}.",
                    names.join(", ")
                ));
                let details = Some(format!(
                    "'{requested}' has no defined ordering within the {line} product line."
                ));
                (suggestion, details)
            }
            SysverError::UnsupportedPlatform(os) => {
                let suggestion = Some(
                    "Capture a snapshot on a Windows host and classify it with \
                     OsInfo::from_snapshot."
                        .to_string(),
                );
                let details = Some(format!("Native version queries are unavailable on {os}."));
                (suggestion, details)
            }
            SysverError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check the syntax of config.toml and any SYSVER_* environment variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            _ => (None, None),
        };

        Self {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
