use crate::DEFAULT_CHUNK_SIZE;

/// One bounded-size slice of a payload.
///
/// Pieces are zero-indexed in emission order. Concatenating a payload's
/// pieces in ascending index order reproduces the payload exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Zero-based position within the payload.
    pub index: u32,
    /// Raw piece data, at most the configured chunk size.
    pub data: Vec<u8>,
}

impl Piece {
    /// Creates a piece from its index and data.
    pub fn new(index: u32, data: Vec<u8>) -> Self {
        Self { index, data }
    }

    /// Size of this piece in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Builds the externally visible display name for a piece.
///
/// The index is zero-padded to three digits (`"000_save.bin"`) and grows
/// naturally past 999. The name is the only place ordering is encoded once
/// a piece leaves the process, so [`parse_piece_index`] must be able to
/// recover the index from it.
pub fn piece_name(index: u32, file_name: &str) -> String {
    format!("{index:03}_{file_name}")
}

/// Recovers the piece index from a display name.
///
/// Parses the leading integer before the first `_` separator. Returns
/// `None` when the name has no separator or no numeric prefix.
pub fn parse_piece_index(name: &str) -> Option<u32> {
    let (prefix, _) = name.split_once('_')?;
    prefix.parse().ok()
}

/// Number of pieces a payload of `payload_size` bytes splits into.
///
/// `ceil(payload_size / chunk_size)`; zero for an empty payload. A zero
/// `chunk_size` falls back to [`DEFAULT_CHUNK_SIZE`], matching the sources.
pub fn piece_count(payload_size: u64, chunk_size: usize) -> u64 {
    if payload_size == 0 {
        return 0;
    }
    let chunk_size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };
    payload_size.div_ceil(chunk_size as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_name_zero_pads_index() {
        assert_eq!(piece_name(0, "save.bin"), "000_save.bin");
        assert_eq!(piece_name(7, "save.bin"), "007_save.bin");
        assert_eq!(piece_name(42, "save.bin"), "042_save.bin");
        assert_eq!(piece_name(999, "save.bin"), "999_save.bin");
    }

    #[test]
    fn piece_name_grows_past_three_digits() {
        assert_eq!(piece_name(1000, "big.dat"), "1000_big.dat");
        assert_eq!(parse_piece_index("1000_big.dat"), Some(1000));
    }

    #[test]
    fn name_index_roundtrip() {
        for index in [0u32, 1, 99, 100, 999, 1234] {
            let name = piece_name(index, "archive.tar");
            assert_eq!(parse_piece_index(&name), Some(index));
        }
    }

    #[test]
    fn parse_index_keeps_underscores_in_file_name() {
        // Only the first separator is significant.
        let name = piece_name(3, "my_long_name.bin");
        assert_eq!(name, "003_my_long_name.bin");
        assert_eq!(parse_piece_index(&name), Some(3));
    }

    #[test]
    fn parse_index_rejects_missing_separator() {
        assert_eq!(parse_piece_index("007"), None);
        assert_eq!(parse_piece_index(""), None);
    }

    #[test]
    fn parse_index_rejects_non_numeric_prefix() {
        assert_eq!(parse_piece_index("abc_file.bin"), None);
        assert_eq!(parse_piece_index("_file.bin"), None);
        assert_eq!(parse_piece_index("1a_file.bin"), None);
    }

    #[test]
    fn piece_count_law() {
        assert_eq!(piece_count(0, 10), 0);
        assert_eq!(piece_count(1, 10), 1);
        assert_eq!(piece_count(9, 10), 1);
        assert_eq!(piece_count(10, 10), 1);
        assert_eq!(piece_count(11, 10), 2);
        assert_eq!(piece_count(25, 10), 3);
        assert_eq!(piece_count(100, 10), 10);
    }

    #[test]
    fn piece_size_reports_data_len() {
        let piece = Piece::new(0, vec![0u8; 123]);
        assert_eq!(piece.size(), 123);
    }
}
