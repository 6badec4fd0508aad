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

use serde::{Deserialize, Serialize};

/// Specific Windows product identified by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsProduct {
    UnknownWin9x,
    Win95,
    Win98,
    WinMe,
    UnknownWin32s,
    UnknownWinNt,
    WinNt,
    Win2K,
    WinXp,
    WinSvr2003,
    WinSvr2003R2,
    WinVista,
    WinSvr2008,
    Win7,
    WinSvr2008R2,
    Win8,
    WinSvr2012,
    Win8Point1,
    WinSvr2012R2,
    Win10,
    Win11,
    WinSvr2016,
    WinSvr2019,
    WinSvr2022,
    WinSvr2025,
    /// Semi-annual / annual channel server, server previews and unrecognised 10.0 servers.
    WinServer,
    /// A version newer than anything the tables know about.
    WinLater,
}

impl OsProduct {
    pub fn name(self) -> &'static str {
        match self {
            OsProduct::UnknownWin9x => "Unknown Windows 9x",
            OsProduct::Win95 => "Windows 95",
            OsProduct::Win98 => "Windows 98",
            OsProduct::WinMe => "Windows Me",
            OsProduct::UnknownWin32s => "Win32s",
            OsProduct::UnknownWinNt => "Unknown Windows NT",
            OsProduct::WinNt => "Windows NT",
            OsProduct::Win2K => "Windows 2000",
            OsProduct::WinXp => "Windows XP",
            OsProduct::WinSvr2003 => "Windows Server 2003",
            OsProduct::WinSvr2003R2 => "Windows Server 2003 R2",
            OsProduct::WinVista => "Windows Vista",
            OsProduct::WinSvr2008 => "Windows Server 2008",
            OsProduct::Win7 => "Windows 7",
            OsProduct::WinSvr2008R2 => "Windows Server 2008 R2",
            OsProduct::Win8 => "Windows 8",
            OsProduct::WinSvr2012 => "Windows Server 2012",
            OsProduct::Win8Point1 => "Windows 8.1",
            OsProduct::WinSvr2012R2 => "Windows Server 2012 R2",
            OsProduct::Win10 => "Windows 10",
            OsProduct::Win11 => "Windows 11",
            OsProduct::WinSvr2016 => "Windows Server 2016",
            OsProduct::WinSvr2019 => "Windows Server 2019",
            OsProduct::WinSvr2022 => "Windows Server 2022",
            OsProduct::WinSvr2025 => "Windows Server 2025",
            OsProduct::WinServer => "Windows Server",
            OsProduct::WinLater => "Windows",
        }
    }

    pub fn is_server(self) -> bool {
        matches!(
            self,
            OsProduct::WinSvr2003
                | OsProduct::WinSvr2003R2
                | OsProduct::WinSvr2008
                | OsProduct::WinSvr2008R2
                | OsProduct::WinSvr2012
                | OsProduct::WinSvr2012R2
                | OsProduct::WinSvr2016
                | OsProduct::WinSvr2019
                | OsProduct::WinSvr2022
                | OsProduct::WinSvr2025
                | OsProduct::WinServer
        )
    }
}

impl std::fmt::Display for OsProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
