//! Backup copies of the working CSV file, taken before it is replaced or emptied.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;
use tracing::debug;

/// Prefix for the copy taken before `load` replaces the table.
pub const PRE_LOAD: &str = "pre-load";

/// Prefix for the copy taken before `clear` empties the table.
pub const PRE_CLEAR: &str = "pre-clear";

const EXTENSION: &str = "csv";

/// Manages backup file creation and rotation.
///
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    data_path: PathBuf,
}

impl Backup {
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            data_path: config.data_path().to_path_buf(),
        }
    }

    /// Copies the working CSV file to `{prefix}.YYYY-MM-DD-NNN.csv` in the backups directory,
    /// where NNN is a sequence number, then deletes the oldest copies with the same prefix so
    /// that at most `backup_copies` remain.
    ///
    /// Returns the path of the copy, or `None` if there was no working file to copy.
    pub async fn snapshot(&self, prefix: &str) -> Result<Option<PathBuf>> {
        if !self.data_path.is_file() {
            return Ok(None);
        }
        let date = today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let path = self
            .backups_dir
            .join(format!("{prefix}.{date}-{seq:03}.{EXTENSION}"));

        utils::copy(&self.data_path, &path).await?;
        debug!("Saved backup to {}", path.display());

        self.rotate(prefix).await?;
        Ok(Some(path))
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        for name in self.file_names().await? {
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Deletes the oldest backups with `prefix`, keeping only `backup_copies` of them.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<String> = self
            .file_names()
            .await?
            .into_iter()
            .filter(|name| is_backup_file(name, prefix))
            .collect();

        // The names sort by date and then sequence number.
        files.sort();

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for name in files.into_iter().take(to_delete) {
            let path = self.backups_dir.join(&name);
            utils::remove(&path).await?;
            debug!("Removed old backup {}", path.display());
        }
        Ok(())
    }

    async fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let seq = filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .strip_suffix(&format!(".{EXTENSION}"))?;
    seq.parse().ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(&format!(".{EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("pre-load.2025-12-14-001.csv", "pre-load", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("pre-load.2025-12-14-042.csv", "pre-load", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("pre-clear.2025-12-14-001.csv", "pre-load", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("pre-load.2025-12-13-001.csv", "pre-load", "2025-12-14"),
            None
        );
        // Wrong extension
        assert_eq!(
            parse_sequence_number("pre-load.2025-12-14-001.json", "pre-load", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("pre-load.2025-12-14-001.csv", "pre-load"));
        assert!(is_backup_file("pre-clear.2025-12-14-001.csv", "pre-clear"));
        assert!(!is_backup_file("pre-load.2025-12-14-001.csv", "pre-clear"));
        assert!(!is_backup_file("pre-load.2025-12-14-001.json", "pre-load"));
    }

    #[tokio::test]
    async fn test_snapshot_and_rotate() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), &Record::examples())
            .await
            .unwrap();
        let backup = config.backup();

        let mut paths = Vec::new();
        for _ in 0..7 {
            paths.push(backup.snapshot(PRE_LOAD).await.unwrap().unwrap());
        }
        backup.snapshot(PRE_CLEAR).await.unwrap().unwrap();

        let names = backup.file_names().await.unwrap();
        let pre_load = names.iter().filter(|n| is_backup_file(n, PRE_LOAD)).count();
        let pre_clear = names.iter().filter(|n| is_backup_file(n, PRE_CLEAR)).count();
        assert_eq!(pre_load, config.backup_copies() as usize);
        assert_eq!(pre_clear, 1);

        // The newest copies survive.
        assert!(!paths[0].exists());
        assert!(paths[6].exists());
        let copied = utils::read(&paths[6]).await.unwrap();
        let original = utils::read(config.data_path()).await.unwrap();
        assert_eq!(copied, original);
    }

    #[tokio::test]
    async fn test_snapshot_without_data_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), &[]).await.unwrap();
        utils::remove(config.data_path()).await.unwrap();
        assert!(config.backup().snapshot(PRE_CLEAR).await.unwrap().is_none());
    }
}
