use crate::error::{Result, TimeSeriesError};

/// Width of one encoded sample in bytes (IEEE-754 binary64).
pub const SAMPLE_WIDTH: usize = std::mem::size_of::<f64>();

/// Decode a binary blob into a sequence of double-precision samples.
///
/// The blob is a packed sequence of little-endian IEEE-754 doubles: no
/// header, no padding, sample `i` occupying bytes `[8i, 8i + 8)`. The byte
/// order is fixed so blobs written on one platform decode identically on any
/// other.
///
/// An empty blob decodes to an empty sequence; a length that is not a
/// multiple of 8 is corrupt data and fails with
/// [`TimeSeriesError::MisalignedBlob`].
pub fn decode_doubles(blob: &[u8]) -> Result<Vec<f64>> {
    if blob.is_empty() {
        return Ok(Vec::new());
    }

    if blob.len() % SAMPLE_WIDTH != 0 {
        return Err(TimeSeriesError::MisalignedBlob {
            length: blob.len(),
            width: SAMPLE_WIDTH,
        });
    }

    Ok(blob
        .chunks_exact(SAMPLE_WIDTH)
        .map(|window| {
            let mut bytes = [0u8; SAMPLE_WIDTH];
            bytes.copy_from_slice(window);
            f64::from_le_bytes(bytes)
        })
        .collect())
}

/// Encode samples into the packed little-endian layout [`decode_doubles`]
/// reads. Exact inverse of the decoder; used by tests and ingestion tooling.
pub fn encode_doubles(samples: &[f64]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(samples.len() * SAMPLE_WIDTH);
    for sample in samples {
        blob.extend_from_slice(&sample.to_le_bytes());
    }
    blob
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blob_decodes_to_empty() {
        assert!(decode_doubles(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_known_bytes_decode() {
        let blob = encode_doubles(&[1.0, 2.5, -3.0]);
        assert_eq!(blob.len(), 24);
        assert_eq!(decode_doubles(&blob).unwrap(), vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_misaligned_length_reports_actual_length() {
        let err = decode_doubles(&[0u8; 7]).unwrap_err();
        match err {
            TimeSeriesError::MisalignedBlob { length, width } => {
                assert_eq!(length, 7);
                assert_eq!(width, 8);
            }
            other => panic!("Expected MisalignedBlob, got {:?}", other),
        }
    }

    #[test]
    fn test_little_endian_layout() {
        // 1.0f64 is 0x3FF0000000000000; little-endian puts the zero bytes first.
        let blob = encode_doubles(&[1.0]);
        assert_eq!(blob, [0, 0, 0, 0, 0, 0, 0xF0, 0x3F]);
    }
}
