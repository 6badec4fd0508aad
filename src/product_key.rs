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

//! Decoding of the `DigitalProductId` registry blob into a product key.
//!
//! The key is a 15 byte little-endian number at offset 52, written in base 24 over a
//! 24 letter alphabet. Windows 8 changed the layout by hiding an `N` somewhere in the
//! key, its position stored as the most significant digit.

use serde::{Deserialize, Serialize};

const KEY_OFFSET: usize = 52;
const KEY_BYTES: usize = 15;
/// Blobs shorter than this cannot hold a key.
pub const MIN_BLOB_LEN: usize = KEY_OFFSET + KEY_BYTES;

const KEY_CHARS: &[u8; 24] = b"BCDFGHJKMPQRTVWXY2346789";

/// The two mutually exclusive encodings of the key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEncoding {
    /// Before Windows 8.
    Legacy,
    /// Windows 8 and later.
    Windows8,
}

impl KeyEncoding {
    pub fn for_version(major: u32, minor: u32) -> Self {
        if (major, minor) >= (6, 2) {
            KeyEncoding::Windows8
        } else {
            KeyEncoding::Legacy
        }
    }
}

/// Decode `blob` with `encoding`; empty when the blob is too short.
pub fn decode_product_key(blob: &[u8], encoding: KeyEncoding) -> String {
    match encoding {
        KeyEncoding::Legacy => decode_legacy(blob),
        KeyEncoding::Windows8 => decode_windows8(blob),
    }
}

/// Divide the key number by 24 in place, returning the remainder.
fn next_digit(key: &mut [u8; KEY_BYTES]) -> usize {
    let mut current: u32 = 0;
    for byte in key.iter_mut().rev() {
        current = (current << 8) | u32::from(*byte);
        *byte = (current / 24) as u8;
        current %= 24;
    }
    current as usize
}

fn key_bytes(blob: &[u8]) -> Option<[u8; KEY_BYTES]> {
    blob.get(KEY_OFFSET..MIN_BLOB_LEN)?.try_into().ok()
}

pub fn decode_legacy(blob: &[u8]) -> String {
    let Some(mut key) = key_bytes(blob) else {
        return String::new();
    };

    let mut output = [b'-'; 29];
    for i in (0..output.len()).rev() {
        if (i + 1) % 6 == 0 {
            continue;
        }
        output[i] = KEY_CHARS[next_digit(&mut key)];
    }
    String::from_utf8_lossy(&output).into_owned()
}

pub fn decode_windows8(blob: &[u8]) -> String {
    let Some(mut key) = key_bytes(blob) else {
        return String::new();
    };

    let high = key[KEY_BYTES - 1];
    let is_win8 = (high / 6) & 1;
    key[KEY_BYTES - 1] = (high & 0xF7) | ((is_win8 & 2) * 4);

    let mut digits = [0u8; 25];
    let mut last = 0;
    for slot in digits.iter_mut().rev() {
        last = next_digit(&mut key);
        *slot = KEY_CHARS[last];
    }

    // The leading digit is the position of the N, not part of the key
    let mut chars = Vec::with_capacity(25);
    chars.extend_from_slice(&digits[1..=last]);
    chars.push(b'N');
    chars.extend_from_slice(&digits[last + 1..]);

    chars
        .chunks(5)
        .map(|group| String::from_utf8_lossy(group).into_owned())
        .collect::<Vec<_>>()
        .join("-")
}
