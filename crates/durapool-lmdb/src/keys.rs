use durapool_core::Sequence;

/// Width of a record key: `u64::MAX` has 20 decimal digits
pub const KEY_WIDTH: usize = 20;

/// Name of the internal database holding each bucket's sequence counter
pub const SEQUENCE_DB: &str = "__durapool_seq";

/// Format a sequence number as a record key
///
/// Keys are zero-padded to a fixed width so that LMDB's lexicographic key
/// order matches numeric order ("00..09" < "00..10").
pub fn sequence_to_key(seq: Sequence) -> String {
    format!("{:0width$}", seq, width = KEY_WIDTH)
}

/// Parse a record key back into its sequence number
pub fn key_to_sequence(bytes: &[u8]) -> Option<Sequence> {
    if bytes.len() != KEY_WIDTH || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_encoding() {
        let key = sequence_to_key(12345);
        assert_eq!(key, "00000000000000012345");
        assert_eq!(key_to_sequence(key.as_bytes()), Some(12345));
        assert_eq!(sequence_to_key(u64::MAX).len(), KEY_WIDTH);
        assert_eq!(
            key_to_sequence(sequence_to_key(u64::MAX).as_bytes()),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_sort_order_across_digit_boundaries() {
        // Unpadded decimal would sort "10" before "9"
        for (a, b) in [(9, 10), (99, 100), (999_999, 1_000_000), (u64::MAX - 1, u64::MAX)] {
            assert!(sequence_to_key(a) < sequence_to_key(b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_rejects_foreign_keys() {
        assert_eq!(key_to_sequence(b"9"), None);
        assert_eq!(key_to_sequence(b"0000000000000000000x"), None);
        assert_eq!(key_to_sequence(b"99999999999999999999"), None); // > u64::MAX
    }
}
