//=========================================================================
// Save Service
//=========================================================================
//
// Persists serde data under a save directory.
//
// Architecture:
//   data ──► Serializer::serialize() ──► bytes ──► <dir>/<path>
//   data ◄── Serializer::deserialize() ◄── bytes ◄── <dir>/<path>
//
// Serializers:
//   JsonTextSerializer        → readable JSON
//   ObfuscatedJsonSerializer  → JSON with every byte XORed with 0xFF
//
// The obfuscated format only keeps save files from being edited by
// accident. It is not encryption.
//
// `save`/`load` return errors; `try_save`/`try_load` log them and report
// success as bool/Option.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;

//=== SaveError ===========================================================

#[derive(Debug)]
pub enum SaveError {
    /// Reading or writing the save file failed.
    Io { path: PathBuf, source: std::io::Error },

    /// The data could not be encoded or decoded.
    Format(serde_json::Error),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Save file I/O failed for {}: {}", path.display(), source)
            }
            Self::Format(e) => write!(f, "Save data format error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e)
    }
}

//=== Serializer ==========================================================

/// Encoding strategy for save data.
pub trait Serializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, SaveError>;
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SaveError>;
}

/// Pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTextSerializer;

impl Serializer for JsonTextSerializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, SaveError> {
        Ok(serde_json::to_vec_pretty(data)?)
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SaveError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Compact JSON with every byte inverted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObfuscatedJsonSerializer;

impl ObfuscatedJsonSerializer {
    const MASK: u8 = 0xFF;

    fn flip(bytes: &mut [u8]) {
        bytes.iter_mut().for_each(|b| *b ^= Self::MASK);
    }
}

impl Serializer for ObfuscatedJsonSerializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, SaveError> {
        let mut bytes = serde_json::to_vec(data)?;
        Self::flip(&mut bytes);
        Ok(bytes)
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SaveError> {
        let mut json = bytes.to_vec();
        Self::flip(&mut json);
        Ok(serde_json::from_slice(&json)?)
    }
}

//=== SaveService =========================================================

#[derive(Debug, Clone)]
pub struct SaveService<Z: Serializer> {
    directory: PathBuf,
    serializer: Z,
}

impl<Z: Serializer> SaveService<Z> {
    pub fn new(directory: impl Into<PathBuf>, serializer: Z) -> Self {
        Self { directory: directory.into(), serializer }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    //--- Fallible API -----------------------------------------------------

    /// Writes `data` to `path` (relative to the save directory), creating
    /// missing parent directories.
    pub fn save<T: Serialize>(&self, path: impl AsRef<Path>, data: &T) -> Result<(), SaveError> {
        let full = self.directory.join(path);
        let bytes = self.serializer.serialize(data)?;

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|source| SaveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&full, bytes).map_err(|source| SaveError::Io { path: full.clone(), source })?;

        debug!("Saved {}", full.display());
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T, SaveError> {
        let full = self.directory.join(path);
        let bytes = fs::read(&full).map_err(|source| SaveError::Io { path: full.clone(), source })?;
        self.serializer.deserialize(&bytes)
    }

    //--- Logging API ------------------------------------------------------

    /// Like [`save`](Self::save); failures are logged and reported as `false`.
    pub fn try_save<T: Serialize>(&self, path: impl AsRef<Path>, data: &T) -> bool {
        match self.save(path, data) {
            Ok(()) => true,
            Err(e) => {
                error!("Save failed: {}", e);
                false
            }
        }
    }

    /// Like [`load`](Self::load); failures are logged and reported as `None`.
    pub fn try_load<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Option<T> {
        match self.load(path) {
            Ok(data) => Some(data),
            Err(e) => {
                error!("Load failed: {}", e);
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Progress {
        level: u32,
        name: String,
        scores: Vec<i64>,
    }

    //--- Test Helpers -----------------------------------------------------

    fn progress() -> Progress {
        Progress { level: 3, name: "tiles".into(), scores: vec![10, -2, 7] }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("trellis-save-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    //=====================================================================
    // Serializers
    //=====================================================================

    #[test]
    fn obfuscated_bytes_are_inverted_json() {
        let bytes = ObfuscatedJsonSerializer.serialize(&42u32).unwrap();
        assert_eq!(bytes, vec![b'4' ^ 0xFF, b'2' ^ 0xFF]);

        let value: u32 = ObfuscatedJsonSerializer.deserialize(&bytes).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn text_serializer_is_readable() {
        let bytes = JsonTextSerializer.serialize(&progress()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"name\": \"tiles\""));
    }

    //=====================================================================
    // SaveService
    //=====================================================================

    #[test]
    fn save_then_load_in_nested_directory() {
        let service = SaveService::new(scratch_dir("nested"), ObfuscatedJsonSerializer);

        assert!(service.try_save("slots/one.sav", &progress()));
        assert_eq!(service.try_load::<Progress>("slots/one.sav"), Some(progress()));

        let _ = fs::remove_dir_all(service.directory());
    }

    #[test]
    fn missing_file_loads_none() {
        let service = SaveService::new(scratch_dir("missing"), JsonTextSerializer);

        assert_eq!(service.try_load::<Progress>("nothing.json"), None);
        assert!(matches!(service.load::<Progress>("nothing.json"), Err(SaveError::Io { .. })));
    }

    #[test]
    fn wrong_format_is_a_format_error() {
        let dir = scratch_dir("format");
        let text = SaveService::new(&dir, JsonTextSerializer);
        assert!(text.try_save("data.json", &progress()));

        let obfuscated = SaveService::new(&dir, ObfuscatedJsonSerializer);
        assert!(matches!(obfuscated.load::<Progress>("data.json"), Err(SaveError::Format(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
