//! Graph file I/O.
//!
//! Graphs round-trip through [`GraphSnapshot`] as pretty-printed RON.
//! Writes go through a temp-file-then-rename so a crash mid-save never
//! truncates an existing file. A failed load returns an error without
//! touching any live graph; callers restore only on success.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;
use ron::ser::PrettyConfig;
use time::OffsetDateTime;
use time::macros::format_description;

use super::settings::EditorSettings;
use crate::graph_utils::graph::GraphSnapshot;

/// Default file extension for graph files.
pub const EXTENSION: &str = "fsm";

/// Ensure the provided path carries the `.fsm` suffix, appending it when
/// missing.
pub fn with_extension(path: &Path) -> PathBuf {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(EXTENSION));
    if matches {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(EXTENSION);
        PathBuf::from(name)
    }
}

static SETTINGS_OVERRIDE: OnceLock<EditorSettings> = OnceLock::new();

/// Pin the settings used for autosave path resolution (e.g. from a host
/// main). First caller wins.
pub fn set_settings_override(settings: EditorSettings) {
    let _ = SETTINGS_OVERRIDE.set(settings);
}

fn autosave_dir() -> PathBuf {
    if let Some(settings) = SETTINGS_OVERRIDE.get() {
        return settings.autosave_dir();
    }
    // Load settings if present; else use defaults
    let settings = EditorSettings::load().unwrap_or_default();
    settings.autosave_dir()
}

pub fn active_state_path() -> PathBuf {
    autosave_dir().join(format!("graph.{}", EXTENSION))
}

pub fn versioned_state_path_now() -> PathBuf {
    let now = OffsetDateTime::now_utc();
    let fmt = format_description!("[year][month][day]_[hour][minute][second]");
    let stamp = now.format(fmt).unwrap_or_else(|_| "unknown".to_string());
    autosave_dir().join(format!("graph_{}.{}", stamp, EXTENSION))
}

fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension(format!("{}.tmp", EXTENSION));
    {
        let mut f = File::create(&tmp_path)?;
        f.write_all(data)?;
        f.flush()?;
    }
    fs::rename(tmp_path, path)?;
    Ok(())
}

/// Serialize a snapshot to the given path (RON, pretty-printed).
pub fn save(path: &Path, snapshot: &GraphSnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let pretty = PrettyConfig::new()
        .separate_tuple_members(true)
        .enumerate_arrays(true);
    let s = ron::ser::to_string_pretty(snapshot, pretty)?;
    atomic_write(path, s.as_bytes())?;
    debug!(
        "saved graph ({} nodes, {} edges) to {}",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        path.display()
    );
    Ok(())
}

/// Deserialize a snapshot from the given path.
pub fn load(path: &Path) -> anyhow::Result<GraphSnapshot> {
    let mut f = File::open(path)?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let snapshot: GraphSnapshot = ron::from_str(&buf)?;
    debug!(
        "loaded graph ({} nodes, {} edges) from {}",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Save the autosave "active" slot.
pub fn save_active(snapshot: &GraphSnapshot) -> anyhow::Result<PathBuf> {
    let path = active_state_path();
    save(&path, snapshot)?;
    Ok(path)
}

/// Save a timestamped autosave version.
pub fn save_versioned(snapshot: &GraphSnapshot) -> anyhow::Result<PathBuf> {
    let path = versioned_state_path_now();
    save(&path, snapshot)?;
    Ok(path)
}

/// Load the autosave "active" slot, if one exists.
pub fn load_active() -> anyhow::Result<Option<GraphSnapshot>> {
    let path = active_state_path();
    if !path.exists() {
        return Ok(None);
    }
    load(&path).map(Some)
}

/// Timestamped autosave versions, newest first.
pub fn list_versions() -> anyhow::Result<Vec<PathBuf>> {
    let dir = autosave_dir();
    let mut entries: Vec<PathBuf> = Vec::new();
    if dir.exists() {
        for e in fs::read_dir(dir)? {
            let p = e?.path();
            if let Some(name) = p.file_name().and_then(|s| s.to_str())
                && name.starts_with("graph_")
                && name.ends_with(&format!(".{}", EXTENSION))
            {
                entries.push(p);
            }
        }
    }
    // sort descending by filename (timestamp)
    entries.sort();
    entries.reverse();
    Ok(entries)
}
