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

//! [`NativeApi`] on top of kernel32/user32.
//!
//! Entry points that are missing on older releases are resolved at runtime; a missing
//! one disables the corresponding capability instead of failing.

use super::{NativeApi, OsVersionInfo, SystemInfo, VersionRequest};
use std::mem;
use std::os::windows::ffi::OsStrExt;
use winapi::shared::minwindef::{BOOL, FARPROC, HMODULE};
use winapi::um::libloaderapi::{GetModuleHandleW, GetProcAddress};
use winapi::um::sysinfoapi::{GetSystemInfo, GetVersionExW, SYSTEM_INFO};
use winapi::um::winnt::{OSVERSIONINFOEXW, OSVERSIONINFOW};
use winapi::um::winuser::GetSystemMetrics;

type VerSetConditionMaskFn = unsafe extern "system" fn(u64, u32, u8) -> u64;
type VerifyVersionInfoWFn = unsafe extern "system" fn(*mut OSVERSIONINFOEXW, u32, u64) -> BOOL;
type GetNativeSystemInfoFn = unsafe extern "system" fn(*mut SYSTEM_INFO);
type GetProductInfoFn = unsafe extern "system" fn(u32, u32, u32, u32, *mut u32) -> BOOL;

pub struct WindowsApi {
    ver_set_condition_mask: Option<VerSetConditionMaskFn>,
    verify_version_info: Option<VerifyVersionInfoWFn>,
    get_native_system_info: Option<GetNativeSystemInfoFn>,
    get_product_info: Option<GetProductInfoFn>,
}

fn wide(s: &str) -> Vec<u16> {
    std::ffi::OsStr::new(s)
        .encode_wide()
        .chain(Some(0))
        .collect()
}

/// Resolve `name` (nul-terminated) in `module` as a function pointer of type `T`.
///
/// # Safety
/// `T` must be an `extern "system"` function pointer type matching the export.
unsafe fn resolve<T: Copy>(module: HMODULE, name: &[u8]) -> Option<T> {
    debug_assert_eq!(name.last(), Some(&0));
    if module.is_null() {
        return None;
    }
    let proc: FARPROC = unsafe { GetProcAddress(module, name.as_ptr().cast()) };
    if proc.is_null() {
        log::debug!(
            "Entry point {} not available",
            String::from_utf8_lossy(&name[..name.len() - 1])
        );
        None
    } else {
        Some(unsafe { mem::transmute_copy::<FARPROC, T>(&proc) })
    }
}

fn csd_string(raw: &[u16]) -> String {
    let end = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..end]).trim().to_string()
}

fn architecture_of(info: &SYSTEM_INFO) -> SystemInfo {
    SystemInfo {
        processor_architecture: unsafe { info.u.s().wProcessorArchitecture },
        number_of_processors: info.dwNumberOfProcessors,
    }
}

impl WindowsApi {
    pub fn new() -> Self {
        let kernel32_name = wide("kernel32.dll");
        let kernel32 = unsafe { GetModuleHandleW(kernel32_name.as_ptr()) };

        // SAFETY: each type alias matches the documented signature of its export
        let api = unsafe {
            Self {
                ver_set_condition_mask: resolve(kernel32, b"VerSetConditionMask\0"),
                verify_version_info: resolve(kernel32, b"VerifyVersionInfoW\0"),
                get_native_system_info: resolve(kernel32, b"GetNativeSystemInfo\0"),
                get_product_info: resolve(kernel32, b"GetProductInfo\0"),
            }
        };

        log::debug!(
            "Resolved native entry points: verifier={}, native_system_info={}, product_info={}",
            api.has_version_verifier(),
            api.get_native_system_info.is_some(),
            api.get_product_info.is_some()
        );
        api
    }
}

impl Default for WindowsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeApi for WindowsApi {
    fn basic_version_info(&self) -> Option<OsVersionInfo> {
        let mut ex: OSVERSIONINFOEXW = unsafe { mem::zeroed() };
        ex.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOEXW>() as u32;

        #[allow(deprecated)]
        let ok = unsafe { GetVersionExW(&mut ex as *mut OSVERSIONINFOEXW as *mut OSVERSIONINFOW) };
        if ok != 0 {
            return Some(OsVersionInfo {
                major: ex.dwMajorVersion,
                minor: ex.dwMinorVersion,
                build: ex.dwBuildNumber,
                platform_id: ex.dwPlatformId,
                csd_version: csd_string(&ex.szCSDVersion),
                extended: true,
                service_pack_major: ex.wServicePackMajor,
                service_pack_minor: ex.wServicePackMinor,
                suite_mask: ex.wSuiteMask,
                product_type: ex.wProductType,
            });
        }

        // Releases before NT 4 SP6 only accept the basic structure
        log::debug!("Extended version info unavailable, retrying with basic structure");
        let mut basic: OSVERSIONINFOW = unsafe { mem::zeroed() };
        basic.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOW>() as u32;
        let ok = unsafe { GetVersionExW(&mut basic) };
        if ok == 0 {
            log::warn!("GetVersionExW failed: {}", std::io::Error::last_os_error());
            return None;
        }

        Some(OsVersionInfo {
            major: basic.dwMajorVersion,
            minor: basic.dwMinorVersion,
            build: basic.dwBuildNumber,
            platform_id: basic.dwPlatformId,
            csd_version: csd_string(&basic.szCSDVersion),
            extended: false,
            ..Default::default()
        })
    }

    fn has_version_verifier(&self) -> bool {
        self.ver_set_condition_mask.is_some() && self.verify_version_info.is_some()
    }

    fn set_condition_mask(&self, condition_mask: u64, type_mask: u32, condition: u8) -> u64 {
        match self.ver_set_condition_mask {
            Some(f) => unsafe { f(condition_mask, type_mask, condition) },
            None => condition_mask,
        }
    }

    fn verify_version_info(
        &self,
        request: &VersionRequest,
        type_mask: u32,
        condition_mask: u64,
    ) -> bool {
        let Some(verify) = self.verify_version_info else {
            return false;
        };

        let mut info: OSVERSIONINFOEXW = unsafe { mem::zeroed() };
        info.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOEXW>() as u32;
        info.dwMajorVersion = request.major;
        info.dwMinorVersion = request.minor;
        info.dwBuildNumber = request.build;
        info.wServicePackMajor = request.service_pack_major;
        info.wServicePackMinor = request.service_pack_minor;
        info.wProductType = request.product_type;

        unsafe { verify(&mut info, type_mask, condition_mask) != 0 }
    }

    fn native_system_info(&self) -> Option<SystemInfo> {
        let f = self.get_native_system_info?;
        let mut info: SYSTEM_INFO = unsafe { mem::zeroed() };
        unsafe { f(&mut info) };
        Some(architecture_of(&info))
    }

    fn system_info(&self) -> SystemInfo {
        let mut info: SYSTEM_INFO = unsafe { mem::zeroed() };
        unsafe { GetSystemInfo(&mut info) };
        architecture_of(&info)
    }

    fn product_info(&self, major: u32, minor: u32, sp_major: u16, sp_minor: u16) -> Option<u32> {
        let f = self.get_product_info?;
        let mut product: u32 = 0;
        let ok = unsafe { f(major, minor, sp_major as u32, sp_minor as u32, &mut product) };
        (ok != 0).then_some(product)
    }

    fn system_metric(&self, index: i32) -> i32 {
        unsafe { GetSystemMetrics(index) }
    }
}
