use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of a byte slice, returning the hex-encoded digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Compute the SHA-256 hash of a string, returning the hex-encoded digest.
#[must_use]
pub fn sha256_hex_str(data: &str) -> String {
    sha256_hex(data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        // Known SHA-256 hash of "hello world"
        assert_eq!(
            sha256_hex(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_hex_empty() {
        // Known SHA-256 hash of the empty input
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_str_matches_bytes() {
        assert_eq!(sha256_hex_str("hello world"), sha256_hex(b"hello world"));
    }
}
