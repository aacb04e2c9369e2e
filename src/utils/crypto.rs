// Sealing of values stored in browser cookies

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use serde::{de::DeserializeOwned, Serialize};

/// Nonce size for AES-256-GCM encryption (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Encryption key size for AES-256 (256 bits)
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// Encrypt any serializable value with AES-256-GCM
///
/// The value is serialized to JSON, sealed under a fresh random nonce and
/// returned as Base64URL(nonce || ciphertext).
///
/// # Errors
///
/// Returns an error if:
/// - Serialization fails
/// - Key length is invalid
/// - AES encryption fails
pub fn encrypt_data<T: Serialize>(data: &T, key: &[u8]) -> Result<String> {
    if key.len() != ENCRYPTION_KEY_SIZE {
        return Err(anyhow!(
            "Invalid key length: expected {ENCRYPTION_KEY_SIZE} bytes, got {}",
            key.len()
        ));
    }

    let json_data = serde_json::to_string(data).context("Failed to serialize data")?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let ciphertext = cipher
        .encrypt(nonce, json_data.as_bytes())
        .map_err(|e| anyhow!("AES encryption failed: {e}"))?;

    let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);

    Ok(general_purpose::URL_SAFE_NO_PAD.encode(&combined))
}

/// Reverse of [`encrypt_data`]
///
/// # Errors
///
/// Returns an error if:
/// - Key length is invalid
/// - Base64 decoding fails
/// - Data is shorter than a nonce
/// - AES decryption fails (wrong key or tampered data)
/// - Deserialization fails
pub fn decrypt_data<T: DeserializeOwned>(encrypted_data: &str, key: &[u8]) -> Result<T> {
    if key.len() != ENCRYPTION_KEY_SIZE {
        return Err(anyhow!(
            "Invalid key length: expected {ENCRYPTION_KEY_SIZE} bytes, got {}",
            key.len()
        ));
    }

    let combined = general_purpose::URL_SAFE_NO_PAD
        .decode(encrypted_data)
        .context("Failed to decode base64 data")?;

    if combined.len() < NONCE_SIZE {
        return Err(anyhow!("Invalid data length"));
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| anyhow!("AES decryption failed: {e}"))?;

    serde_json::from_slice(&plaintext).context("Failed to deserialize data from decrypted JSON")
}

/// Stretch or truncate arbitrary key material to exactly 32 bytes
///
/// Empty input yields an all-zero key. Configured secrets are expected to be
/// long random strings, so this is a fit-to-size step, not a KDF.
#[must_use]
pub fn derive_encryption_key(input_key: &[u8]) -> [u8; ENCRYPTION_KEY_SIZE] {
    let mut encryption_key = [0u8; ENCRYPTION_KEY_SIZE];
    let key_len = std::cmp::min(input_key.len(), ENCRYPTION_KEY_SIZE);
    encryption_key[..key_len].copy_from_slice(&input_key[..key_len]);

    if key_len > 0 && key_len < ENCRYPTION_KEY_SIZE {
        for i in key_len..ENCRYPTION_KEY_SIZE {
            encryption_key[i] =
                encryption_key[i % key_len].wrapping_add(u8::try_from(i % 256).unwrap_or(0));
        }
    }

    encryption_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        token: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            token: "abc123".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = derive_encryption_key(b"unit-test-secret");
        let sealed = encrypt_data(&sample(), &key).unwrap();

        assert!(!sealed.contains("abc123"));
        let opened: Sample = decrypt_data(&sealed, &key).unwrap();
        assert_eq!(opened, sample());
    }

    #[test]
    fn test_nonce_makes_ciphertext_unique() {
        let key = derive_encryption_key(b"unit-test-secret");
        let first = encrypt_data(&sample(), &key).unwrap();
        let second = encrypt_data(&sample(), &key).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let key = derive_encryption_key(b"unit-test-secret");
        let other = derive_encryption_key(b"another-secret");
        let sealed = encrypt_data(&sample(), &key).unwrap();

        let result: Result<Sample> = decrypt_data(&sealed, &other);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        let key = derive_encryption_key(b"unit-test-secret");
        assert!(decrypt_data::<Sample>("not base64 !!", &key).is_err());
        assert!(decrypt_data::<Sample>("AAAA", &key).is_err());
    }

    #[test]
    fn test_invalid_key_length() {
        let err = encrypt_data(&sample(), b"short").unwrap_err();
        assert!(err.to_string().contains("Invalid key length"));
    }

    #[test]
    fn test_derive_encryption_key() {
        let long = [7u8; 40];
        assert_eq!(derive_encryption_key(&long), [7u8; 32]);

        let short = derive_encryption_key(b"ab");
        assert_eq!(&short[..2], b"ab");
        assert_eq!(short, derive_encryption_key(b"ab"));

        assert_eq!(derive_encryption_key(b""), [0u8; 32]);
    }
}
