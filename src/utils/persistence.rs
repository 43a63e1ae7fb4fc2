//! JSON file helpers shared by the config manager and the CLI store.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::SubcycleError;

const TMP_SUFFIX: &str = "tmp";

/// Serializes `value` as pretty JSON and replaces `path` atomically by staging
/// to a sibling temporary file.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), SubcycleError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a JSON document from disk.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SubcycleError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads a JSON document, falling back to `T::default()` when the file is absent.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, SubcycleError> {
    if path.exists() {
        load_json(path)
    } else {
        Ok(T::default())
    }
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

fn write_file(path: &Path, data: &str) -> Result<(), SubcycleError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut value = BTreeMap::new();
        value.insert("seen".to_string(), 3u32);

        save_json(&value, &path).unwrap();
        let loaded: BTreeMap<String, u32> = load_json(&path).unwrap();
        assert_eq!(loaded, value);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let loaded: Vec<String> = load_json_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }
}
