use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File-backed key-value store.
///
/// Keeps the full map in memory and rewrites the file on every mutation.
/// Offer logs are small, so a whole-file rewrite per append is acceptable.
///
/// File format: repeated `[key_len:u32 LE][key][value_len:u32 LE][value]`.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, creating an empty one if the file is missing.
    ///
    /// ## Errors
    ///
    /// - `IOError`: the file exists but cannot be read
    /// - `CorruptionError`: the file ends in the middle of a record
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                let data = decode(&bytes)?;
                #[cfg(feature = "tracing-log")]
                tracing::info!(
                    path = %path.display(),
                    bytes = bytes.len(),
                    keys = data.len(),
                    "[ol-01] Loaded existing storage file"
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing-log")]
                tracing::info!(path = %path.display(), "[ol-01] No existing storage file");
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = encode(&self.data)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

fn encode(data: &HashMap<Vec<u8>, Vec<u8>>) -> Result<Vec<u8>, KVStoreError> {
    let mut bytes = Vec::new();
    for (key, value) in data {
        bytes.extend_from_slice(&length_prefix(key.len())?);
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&length_prefix(value.len())?);
        bytes.extend_from_slice(value);
    }
    Ok(bytes)
}

fn length_prefix(len: usize) -> Result<[u8; 4], KVStoreError> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| KVStoreError::IOError {
            message: format!("entry of {} bytes exceeds the 4 GiB record limit", len),
        })
}

fn decode(bytes: &[u8]) -> Result<HashMap<Vec<u8>, Vec<u8>>, KVStoreError> {
    let mut data = HashMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = |at: usize| KVStoreError::CorruptionError {
        message: format!("storage file truncated at byte {}", at),
    };

    let header: [u8; 4] = bytes
        .get(*cursor..*cursor + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| truncated(*cursor))?;
    *cursor += 4;

    let len = u32::from_le_bytes(header) as usize;
    let chunk = bytes
        .get(*cursor..*cursor + len)
        .ok_or_else(|| truncated(*cursor))?
        .to_vec();
    *cursor += len;

    Ok(chunk)
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let previous = self.data.insert(key.to_vec(), value.to_vec());
        if let Err(e) = self.save_to_file() {
            // Keep memory consistent with disk
            match previous {
                Some(old) => self.data.insert(key.to_vec(), old),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        let results: Vec<_> = self
            .data
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }
}
