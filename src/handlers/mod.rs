pub mod xml;

use std::path::Path;
use tracing::debug;

use crate::error::SourceError;

pub use xml::{ElementPath, XmlElement};

/// Read a whole source file and decode it, honouring a UTF-8/UTF-16 BOM.
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_source(&bytes, &path.display().to_string())
}

/// Decode source bytes, UTF-8 unless a BOM says otherwise. Byte sequences
/// that are invalid in the detected encoding make the source malformed.
pub fn decode_source(bytes: &[u8], origin: &str) -> Result<String, SourceError> {
    let (encoding, bom_length) = encoding_rs::Encoding::for_bom(bytes)
        .unwrap_or((encoding_rs::UTF_8, 0));
    debug!("Decoding {} as {}", origin, encoding.name());

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .map(|text| text.into_owned())
        .ok_or_else(|| SourceError::Encoding {
            origin: origin.to_string(),
            encoding: encoding.name(),
        })
}
