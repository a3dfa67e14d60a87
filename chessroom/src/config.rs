//! Room store directory configuration.
//!
//! Precedence:
//! 1. CHESSROOM_DATA_DIR environment variable
//! 2. ~/.config/chessroom/rooms
//! 3. ./data (fallback for development)

use std::path::PathBuf;

const DEFAULT_CONFIG_DIR: &str = ".config/chessroom/rooms";
const DEV_DATA_DIR: &str = "./data";

/// Directory holding shared room records.
pub fn get_rooms_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHESSROOM_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooms_dir_is_nonempty() {
        // Resolves through env var, HOME, or the dev fallback; all yield a path.
        assert!(!get_rooms_dir().as_os_str().is_empty());
    }
}
