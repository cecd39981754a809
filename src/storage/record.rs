//! Classification record format
//!
//! On-disk layout, little endian throughout:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32) total bytes including this field and the checksum
//! +------------------+
//! | Grid Key         | (u32 length + UTF-8 bytes)
//! +------------------+
//! | Outcome          | (u8: 0 = human, 1 = mutant)
//! +------------------+
//! | Recorded At      | (i64 Unix millis)
//! +------------------+
//! | Checksum         | (u32 CRC32 over every preceding byte)
//! +------------------+
//! ```

use std::io::{self, Read};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checksum::compute_checksum;

/// Smallest possible record: length + empty key + outcome + timestamp + checksum.
pub const MIN_RECORD_SIZE: usize = 4 + 4 + 1 + 8 + 4;

/// One persisted classification. Append-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Canonical grid key
    pub key: String,
    /// Outcome: true when the grid qualified as mutant
    pub is_mutant: bool,
    /// When the outcome was first recorded
    pub recorded_at_ms: i64,
}

impl ClassificationRecord {
    /// Create a record stamped with the current time.
    pub fn new(key: impl Into<String>, is_mutant: bool) -> Self {
        Self::with_timestamp(key, is_mutant, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(key: impl Into<String>, is_mutant: bool, recorded_at_ms: i64) -> Self {
        Self {
            key: key.into(),
            is_mutant,
            recorded_at_ms,
        }
    }

    /// Recorded time as a UTC timestamp, if representable.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.recorded_at_ms)
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.key.len() + 1 + 8);
        buf.extend_from_slice(&(self.key.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.key.as_bytes());
        buf.push(u8::from(self.is_mutant));
        buf.extend_from_slice(&self.recorded_at_ms.to_le_bytes());
        buf
    }

    /// Serialize the complete framed record.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize one framed record, verifying its checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Record too short"));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed_checksum = compute_checksum(&data[..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut len_buf = [0u8; 4];
        cursor.read_exact(&mut len_buf)?;
        let key_len = u32::from_le_bytes(len_buf) as usize;
        let mut key_buf = vec![0u8; key_len];
        cursor.read_exact(&mut key_buf)?;
        let key = String::from_utf8(key_buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e)))?;

        let mut outcome_buf = [0u8; 1];
        cursor.read_exact(&mut outcome_buf)?;
        let is_mutant = match outcome_buf[0] {
            0 => false,
            1 => true,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid outcome byte: {}", other),
                ))
            }
        };

        let mut ts_buf = [0u8; 8];
        cursor.read_exact(&mut ts_buf)?;
        let recorded_at_ms = i64::from_le_bytes(ts_buf);

        Ok((
            Self {
                key,
                is_mutant,
                recorded_at_ms,
            },
            record_length,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassificationRecord {
        ClassificationRecord::with_timestamp("AAAA,CAGT,TTAT,AAAA", true, 1_700_000_000_000)
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample();
        let bytes = record.serialize();
        let (decoded, consumed) = ClassificationRecord::deserialize(&bytes).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_length_prefix_matches() {
        let bytes = sample().serialize();
        let declared = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(declared, bytes.len());
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let mut bytes = sample().serialize();
        bytes[8] ^= 0xFF;
        let err = ClassificationRecord::deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("Checksum mismatch"));
    }

    #[test]
    fn test_truncated_record() {
        let bytes = sample().serialize();
        let err = ClassificationRecord::deserialize(&bytes[..bytes.len() - 2]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_new_stamps_current_time() {
        let before = Utc::now().timestamp_millis();
        let record = ClassificationRecord::new("k", false);
        assert!(record.recorded_at_ms >= before);
        assert!(record.recorded_at().is_some());
    }
}
