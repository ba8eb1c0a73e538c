//! Raw DEFLATE (RFC 1951) compression, no zlib or gzip framing.

use std::io::Write;

use flate2::{write::DeflateEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::error::{Result, SealError};

/// Upper bound on decompressed output. Envelopes are small; anything larger
/// is treated as a decompression bomb.
pub const MAX_DECOMPRESSED_LEN: usize = 16 * 1024 * 1024;

const INITIAL_CHUNK: usize = 1024;

/// Compress `data` at the best compression level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder =
        DeflateEncoder::new(Vec::with_capacity(data.len() / 2 + 16), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| SealError::Compress(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| SealError::Compress(e.to_string()))
}

/// Decompress a raw DEFLATE stream.
///
/// The stream must reach its final block. Bytes after the final block are
/// ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    // One byte of headroom past the limit so an oversized stream is detected
    // rather than stalling on a full buffer.
    let limit = MAX_DECOMPRESSED_LEN + 1;

    let mut decoder = Decompress::new(false);
    let mut out = Vec::with_capacity(INITIAL_CHUNK.min(limit));

    loop {
        if out.len() == out.capacity() {
            if out.len() >= limit {
                return Err(SealError::Decompress(format!(
                    "output exceeds {MAX_DECOMPRESSED_LEN} bytes"
                )));
            }
            let grow = out.capacity().max(INITIAL_CHUNK).min(limit - out.len());
            out.reserve_exact(grow);
        }

        let in_before = decoder.total_in();
        let out_before = decoder.total_out();
        let consumed = usize::try_from(in_before)
            .map_err(|_| SealError::Decompress("input offset overflow".into()))?;
        let input = data.get(consumed..).unwrap_or_default();

        let status = decoder
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| SealError::Decompress(e.to_string()))?;

        if out.len() > MAX_DECOMPRESSED_LEN {
            return Err(SealError::Decompress(format!(
                "output exceeds {MAX_DECOMPRESSED_LEN} bytes"
            )));
        }

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let progressed =
                    decoder.total_in() != in_before || decoder.total_out() != out_before;
                if !progressed && out.len() < out.capacity() {
                    return Err(SealError::Decompress("truncated deflate stream".into()));
                }
            }
        }
    }
}
