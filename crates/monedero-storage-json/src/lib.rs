//! Filesystem-backed JSON persistence for the whole profile document
//! and its backups.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use monedero_core::{CoreError, CoreResult, StateBackupInfo, StateStorage};
use monedero_domain::PersistedState;

const STATE_FILE: &str = "state.json";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Root directories the storage writes under.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

/// Persists the whole state document as pretty JSON, keeping a pruned
/// set of timestamped backups of previous versions.
#[derive(Clone)]
pub struct JsonStateStorage {
    paths: StoragePaths,
    retention: usize,
}

impl JsonStateStorage {
    pub fn new(paths: StoragePaths) -> CoreResult<Self> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> CoreResult<Self> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            paths,
            retention: retention.max(1),
        })
    }

    pub fn state_path(&self) -> PathBuf {
        self.paths.data_root.join(STATE_FILE)
    }

    fn write_backup_file(
        &self,
        state: &PersistedState,
        note: Option<&str>,
    ) -> CoreResult<StateBackupInfo> {
        fs::create_dir_all(&self.paths.backup_root)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("state_{}", timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, BACKUP_EXTENSION);
        let path = self.paths.backup_root.join(&file_name);
        write_atomic(&path, &serialize_state(state)?)?;
        self.prune_backups()?;
        Ok(StateBackupInfo {
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self) -> CoreResult<()> {
        let current = self.state_path();
        if !current.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.paths.backup_root)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("state_{}.{}", timestamp, BACKUP_EXTENSION);
        let backup_path = self.paths.backup_root.join(file_name);
        fs::copy(&current, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> CoreResult<()> {
        let mut entries = self.list_backups()?;
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl StateStorage for JsonStateStorage {
    fn load_state(&self) -> CoreResult<Option<PersistedState>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let state =
            serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
        Ok(Some(state))
    }

    fn save_state(&self, state: &PersistedState) -> CoreResult<()> {
        let path = self.state_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.backup_existing_file()?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_state(state)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn backup_state(
        &self,
        state: &PersistedState,
        note: Option<&str>,
    ) -> CoreResult<StateBackupInfo> {
        self.write_backup_file(state, note)
    }

    fn list_backups(&self) -> CoreResult<Vec<StateBackupInfo>> {
        let dir = &self.paths.backup_root;
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(StateBackupInfo {
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &StateBackupInfo) -> CoreResult<PersistedState> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.state_path();
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        let data = fs::read_to_string(&target)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }
}

fn serialize_state(state: &PersistedState) -> CoreResult<String> {
    serde_json::to_string_pretty(state).map_err(|err| CoreError::Serde(err.to_string()))
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let mut segments = trimmed.split('_').collect::<Vec<_>>();
    if segments.len() < 3 {
        return None;
    }
    // Trailing note segments come after the timestamp pair.
    while segments.len() > 3 {
        segments.pop();
    }
    let time = segments.pop().unwrap();
    let date = segments.pop().unwrap();
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
