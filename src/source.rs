//! Best-effort source file decoding.
//!
//! Order of attempts: byte-order mark, strict UTF-8, then a statistical guess
//! over the leading bytes. A NUL byte in the leading sample marks the file as
//! binary. The detected encoding and BOM are kept so that a rewritten file is
//! stored the way it was read.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bytes inspected for NUL when sniffing binary content.
const SAMPLE_LEN: usize = 1024;

/// Bytes fed to the charset detector.
const DETECT_LEN: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is binary or uses an unsupported encoding")]
    Undecodable { path: PathBuf },
}

/// Text of a source file plus how it was stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSource {
    pub text: String,
    pub encoding: &'static Encoding,
    /// The file started with a byte-order mark
    pub bom: bool,
}

impl DecodedSource {
    pub fn lines(&self) -> Vec<String> {
        split_lines(&self.text)
    }

    /// Encode `text` with this source's encoding, restoring the BOM.
    ///
    /// Characters the encoding cannot represent are written as numeric
    /// character references, with a warning.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() + 3);
        if self.encoding == UTF_16LE || self.encoding == UTF_16BE {
            if self.bom {
                bytes.extend_from_slice(if self.encoding == UTF_16LE { b"\xFF\xFE" } else { b"\xFE\xFF" });
            }
            for unit in text.encode_utf16() {
                let pair = if self.encoding == UTF_16LE { unit.to_le_bytes() } else { unit.to_be_bytes() };
                bytes.extend_from_slice(&pair);
            }
            return bytes;
        }

        if self.bom && self.encoding == UTF_8 {
            bytes.extend_from_slice(b"\xEF\xBB\xBF");
        }
        let (encoded, _, unmappable) = self.encoding.encode(text);
        if unmappable {
            tracing::warn!(
                encoding = self.encoding.name(),
                "replacement text has characters the file encoding cannot represent"
            );
        }
        bytes.extend_from_slice(&encoded);
        bytes
    }
}

/// Decode raw file bytes to text, or `None` for binary content.
pub fn decode(bytes: &[u8]) -> Option<DecodedSource> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (!had_errors).then(|| DecodedSource {
            text: text.into_owned(),
            encoding,
            bom: true,
        });
    }

    if bytes[..bytes.len().min(SAMPLE_LEN)].contains(&0) {
        return None;
    }

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return Some(DecodedSource {
            text: text.into_owned(),
            encoding: UTF_8,
            bom: false,
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&bytes[..bytes.len().min(DETECT_LEN)], true);
    let guessed = detector.guess(None, false);
    // single-byte fallback decodes every byte
    let (encoding, text) = match guessed.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => (guessed, text.into_owned()),
        None => {
            tracing::debug!(guessed = guessed.name(), "charset guess failed, using windows-1252");
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (WINDOWS_1252, text.into_owned())
        }
    };
    Some(DecodedSource {
        text,
        encoding,
        bom: false,
    })
}

pub fn read_decoded(path: &Path) -> Result<DecodedSource, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes).ok_or_else(|| SourceError::Undecodable {
        path: path.to_path_buf(),
    })
}

pub fn read_source(path: &Path) -> Result<String, SourceError> {
    read_decoded(path).map(|decoded| decoded.text)
}

/// Split text into lines, each keeping its terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

pub fn read_source_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    read_decoded(path).map(|decoded| decoded.lines())
}
