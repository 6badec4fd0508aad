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

use crate::error::{ErrorContext, SysverError};
use crate::models::FeatureUpdate;
use std::error::Error as _;

/// Error, details and suggestion, followed by every underlying cause.
pub fn format_error_chain(error: &SysverError) -> String {
    let mut output = ErrorContext::new(error).to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        output.push_str(&format!("\n\nCaused by: {cause}"));
        source = cause.source();
    }
    output
}

/// Terminal rendering: the offending registry path or the valid feature updates are
/// listed on their own lines.
pub fn format_error_with_color(error: &SysverError, use_color: bool) -> String {
    let paint = |code: &str, text: &str| {
        if use_color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    };

    let context = ErrorContext::new(error);
    let mut output = format!("{} {error}\n", paint("1;31", "Error:"));

    match error {
        SysverError::UnexpectedRegistryType { key, value, .. } => {
            let path = format!(r"HKEY_LOCAL_MACHINE\{key}\{value}");
            output.push_str(&format!("\n  {}\n", paint("36", &path)));
        }
        SysverError::InvalidFeatureUpdate { line, .. } => {
            output.push_str(&format!("\n{}\n", paint("1;33", &format!("{line} feature updates:"))));
            for update in FeatureUpdate::members(*line) {
                output.push_str(&format!("  • {}\n", paint("36", update.name())));
            }
            return output;
        }
        _ => {
            if let Some(details) = &context.details {
                output.push_str(&format!("\n{details}\n"));
            }
        }
    }

    if let Some(suggestion) = &context.suggestion {
        output.push_str(&format!("\n{} {suggestion}\n", paint("1;33", "Suggestion:")));
    }
    output
}
