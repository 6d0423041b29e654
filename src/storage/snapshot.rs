//! Versioned binary snapshot of a word table and language model.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! offset  size  field
//! 0       4     magic "NGSP"
//! 4       4     format version (u32)
//! 8       8     payload length in bytes (u64)
//! 16      4     CRC-32 of the payload (u32)
//! 20      n     bincode-encoded payload
//! ```
//!
//! The payload holds the creation time, the [`WordFrequencyTable`] and the
//! [`NgramLanguageModel`]. A reader rejects unknown versions instead of
//! guessing at their layout.

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellerError};
use crate::language_model::NgramLanguageModel;
use crate::spelling::dictionary::WordFrequencyTable;

/// File signature.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"NGSP";

/// Current format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Size of the fixed header in bytes.
pub const SNAPSHOT_HEADER_LEN: usize = 20;

/// Everything needed to restore a corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub created_at: DateTime<Utc>,
    pub dictionary: WordFrequencyTable,
    pub model: NgramLanguageModel,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(dictionary: WordFrequencyTable, model: NgramLanguageModel) -> Self {
        Snapshot {
            created_at: Utc::now(),
            dictionary,
            model,
        }
    }

    /// Encode header and payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = bincode::serialize(self)?;

        let mut bytes = Vec::with_capacity(SNAPSHOT_HEADER_LEN + payload.len());
        bytes.write_all(&SNAPSHOT_MAGIC)?;
        bytes.write_u32::<LittleEndian>(SNAPSHOT_VERSION)?;
        bytes.write_u64::<LittleEndian>(payload.len() as u64)?;
        bytes.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decode and verify a snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SNAPSHOT_HEADER_LEN {
            return Err(SpellerError::snapshot(format!(
                "truncated header: {} bytes",
                bytes.len()
            )));
        }

        let mut header = Cursor::new(&bytes[..SNAPSHOT_HEADER_LEN]);
        let mut magic = [0u8; 4];
        header.read_exact(&mut magic)?;
        if magic != SNAPSHOT_MAGIC {
            return Err(SpellerError::snapshot("not a snapshot file (bad magic)"));
        }

        let version = header.read_u32::<LittleEndian>()?;
        if version != SNAPSHOT_VERSION {
            return Err(SpellerError::snapshot(format!(
                "unsupported snapshot version {version}, expected {SNAPSHOT_VERSION}"
            )));
        }

        let payload_len = header.read_u64::<LittleEndian>()?;
        let checksum = header.read_u32::<LittleEndian>()?;

        let payload = &bytes[SNAPSHOT_HEADER_LEN..];
        if payload.len() as u64 != payload_len {
            return Err(SpellerError::snapshot(format!(
                "payload is {} bytes, header says {payload_len}",
                payload.len()
            )));
        }
        if crc32fast::hash(payload) != checksum {
            return Err(SpellerError::snapshot("checksum mismatch"));
        }

        let snapshot: Snapshot = bincode::deserialize(payload)?;

        // Totals and lengths are stored alongside the counts; recompute them.
        let rebuilt = WordFrequencyTable::from_counts(snapshot.dictionary.iter())
            .map_err(|e| SpellerError::snapshot(format!("unusable word table: {e}")))?;
        if rebuilt != snapshot.dictionary {
            return Err(SpellerError::snapshot(
                "word table totals do not match its counts",
            ));
        }
        Ok(snapshot)
    }

    /// Write the snapshot to `path`.
    ///
    /// The bytes go to a sibling temporary file first, which is then renamed
    /// over `path`, so readers never see a partial file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                SpellerError::snapshot(format!("invalid snapshot path: {}", path.display()))
            })?;
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

        let bytes = self.to_bytes()?;
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(&bytes)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&temp_path, path)?;

        info!(
            "saved snapshot to {} ({} bytes, {} words)",
            path.display(),
            bytes.len(),
            self.dictionary.word_count()
        );
        Ok(())
    }

    /// Read and verify a snapshot from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let snapshot = Self::from_bytes(&bytes)?;
        info!(
            "loaded snapshot from {} (created {})",
            path.display(),
            snapshot.created_at.to_rfc3339()
        );
        Ok(snapshot)
    }
}
