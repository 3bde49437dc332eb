// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

/// Application data directory. Not created here; `AppConfig::save` creates it
/// on first write.
pub fn data_dir() -> PathBuf {
    base_dir().join("klartext")
}

/// Default location of the persisted `AppConfig`.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

fn base_dir() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata);
    }
    // Last resort
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_in_klartext_dir() {
        let path = config_path();
        assert!(path.ends_with("klartext/config.json"));
    }
}
