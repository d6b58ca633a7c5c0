//! Conventional source and destination directories per platform.
//!
//! Resolution is a pure function of the platform and an environment
//! lookup so tests can exercise every platform from one host.

use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

/// Host platform families with distinct client directory conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other unix-likes following XDG-ish layouts.
    Linux,
    /// Windows, resolved through `APPDATA` and `LOCALAPPDATA`.
    Windows,
    /// `macOS`, mixing unix config paths with `Library/Application Support`.
    MacOs,
}

impl Platform {
    /// Platform of the running host.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

/// Conventional directories for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDefaults {
    /// Source client configuration directory.
    pub source_dir: PathBuf,
    /// Target client session-state directory.
    pub dest_dir: PathBuf,
}

impl PlatformDefaults {
    /// Resolve the conventional directories for `platform`.
    ///
    /// `env` supplies environment lookups (`HOME`, `APPDATA`,
    /// `LOCALAPPDATA`) so resolution stays deterministic under test.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvironment`] when a variable the
    /// platform depends on is absent.
    pub fn resolve(
        platform: Platform,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let var = |variable: &'static str| {
            env(variable).ok_or(ConfigError::MissingEnvironment { variable })
        };
        match platform {
            Platform::Linux => {
                let home = PathBuf::from(var("HOME")?);
                Ok(Self {
                    source_dir: home.join(".config").join("deluge"),
                    dest_dir: home
                        .join(".local")
                        .join("share")
                        .join("data")
                        .join("qBittorrent")
                        .join("BT_backup"),
                })
            }
            Platform::Windows => Ok(Self {
                source_dir: PathBuf::from(var("APPDATA")?).join("deluge"),
                dest_dir: PathBuf::from(var("LOCALAPPDATA")?)
                    .join("qBittorrent")
                    .join("BT_backup"),
            }),
            Platform::MacOs => {
                let home = PathBuf::from(var("HOME")?);
                Ok(Self {
                    source_dir: home.join(".config").join("deluge"),
                    dest_dir: home
                        .join("Library")
                        .join("Application Support")
                        .join("QBittorrent")
                        .join("BT_backup"),
                })
            }
        }
    }
}
