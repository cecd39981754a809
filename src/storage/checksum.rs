//! CRC32 (IEEE) checksums for classification records.
//!
//! Every record is verified on read; a mismatch is treated as corruption.

use crc32fast::Hasher;

/// CRC32 over `data`.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
