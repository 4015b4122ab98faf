//! Best-score persistence.
//!
//! The record is a text file holding one decimal integer. A missing or
//! unreadable file means no record yet (0); the file is only rewritten when a
//! session beats the stored value.

use std::io;
use std::path::{Path, PathBuf};

/// Parse the file contents; surrounding whitespace is ignored.
pub fn parse_high_score(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

pub fn load_high_score(path: &Path) -> u32 {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_high_score(&text).unwrap_or_else(|| {
            log::warn!("High score file {} is malformed, treating as 0", path.display());
            0
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No high score file at {}, starting fresh", path.display());
            0
        }
        Err(e) => {
            log::warn!("Could not read {}: {}, treating high score as 0", path.display(), e);
            0
        }
    }
}

pub fn save_high_score(path: &Path, score: u32) -> io::Result<()> {
    std::fs::write(path, score.to_string())
}

/// The persisted record plus an in-memory copy of it.
#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
    best: u32,
}

impl HighscoreStore {
    /// Read the record at `path` once.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = load_high_score(&path);
        Self { path, best }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a finished session's score. Writes the file and returns
    /// `Ok(true)` only when `score` beats the record.
    ///
    /// The in-memory record is raised even if the write fails, so the high
    /// score never goes down during a run.
    pub fn record(&mut self, score: u32) -> io::Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        save_high_score(&self.path, score)?;
        log::info!("New high score {} saved to {}", score, self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_high_score("42"), Some(42));
        assert_eq!(parse_high_score(" 7\n"), Some(7));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_high_score(""), None);
        assert_eq!(parse_high_score("abc"), None);
        assert_eq!(parse_high_score("-3"), None);
        assert_eq!(parse_high_score("1.5"), None);
    }
}
