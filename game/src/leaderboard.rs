use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One completed, correct attempt. The wire layout matches the persisted
/// record: a JSON array of these objects, camelCase keys. Older records with
/// absent fields read as defaults; future fields are additive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub department: String,
    pub student_id: String,
    /// Elapsed time in seconds; the scoring and sort key.
    pub time: f64,
    /// Epoch milliseconds at submission.
    pub timestamp: i64,
}

/// Stable ascending sort by time. Equal times keep insertion order, which is
/// the tie-break rule for the board.
pub fn sort_ascending(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// Base directory for the game's local records, unless an explicit path
/// overrides it per store.
pub fn config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".config");
                p
            })
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = base;
    path.push("speed-challenge");
    path
}

/// The single persisted leaderboard record. Reads recover silently from
/// missing or malformed data; writes replace the whole sequence (last writer
/// wins). The store does not sort; callers sort before writing.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("SPRINT_LEADERBOARD_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }
        Self {
            path: config_dir().join("leaderboard.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Vec<Entry> {
        let Ok(bytes) = fs::read(&self.path) else {
            return Vec::new();
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    pub fn write(&self, entries: &[Entry]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

/// Formats the top `limit` entries for the leaderboard view.
pub fn render_top(entries: &[Entry], limit: usize) -> String {
    if entries.is_empty() {
        return "No records yet. Be the first!".to_string();
    }

    let mut out = String::new();
    for (rank, entry) in entries.iter().take(limit).enumerate() {
        let played_at = DateTime::from_timestamp_millis(entry.timestamp)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>2}. {} ({}) - {:.3}s  [{}]\n",
            rank + 1,
            entry.name,
            entry.department,
            entry.time,
            played_at,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, time: f64) -> Entry {
        Entry {
            name: name.to_string(),
            department: "CS".to_string(),
            student_id: "123".to_string(),
            time,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn sort_is_ascending_and_stable() {
        let mut entries = vec![
            entry("slow", 9.5),
            entry("first-of-tie", 2.0),
            entry("fast", 1.25),
            entry("second-of-tie", 2.0),
        ];
        sort_ascending(&mut entries);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["fast", "first-of-tie", "second-of-tie", "slow"]);
    }

    #[test]
    fn older_record_without_newer_fields_still_reads() {
        let parsed: Vec<Entry> =
            serde_json::from_str(r#"[{"name":"Kim","time":2.5,"timestamp":1700000000000}]"#)
                .expect("partial entry should parse");
        assert_eq!(parsed[0].name, "Kim");
        assert_eq!(parsed[0].department, "");
        assert_eq!(parsed[0].student_id, "");
    }

    #[test]
    fn render_lists_rank_name_and_seconds() {
        let board = vec![entry("Kim", 2.345), entry("Lee", 3.0)];
        let text = render_top(&board, 10);
        assert!(text.contains(" 1. Kim (CS) - 2.345s"));
        assert!(text.contains(" 2. Lee (CS) - 3.000s"));
    }

    #[test]
    fn render_caps_at_limit() {
        let board = vec![entry("a", 1.0), entry("b", 2.0), entry("c", 3.0)];
        let text = render_top(&board, 2);
        assert!(text.contains("a"));
        assert!(text.contains("b"));
        assert!(!text.contains("c"));
    }

    #[test]
    fn empty_board_renders_placeholder() {
        assert!(render_top(&[], 10).contains("No records"));
    }
}
