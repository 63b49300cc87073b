//! Symmetric encryption of token plaintext
//!
//! Tokens are sealed with AES-256-GCM. The AEAD key is the SHA-256 digest of
//! the caller's secret key string, and every token carries its own random
//! nonce. Wire format: `base64url_nopad(nonce || ciphertext || tag)`.

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};

use super::errors::CipherError;
use crate::utils::{base64url_decode, base64url_encode};

/// Encrypts and decrypts token plaintext with a string key.
pub trait TokenCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError>;
    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmCipher;

fn derive_key(key: &str) -> Result<LessSafeKey, CipherError> {
    if key.is_empty() {
        return Err(CipherError::InvalidKey(
            "Secret key must not be empty".to_string(),
        ));
    }
    let digest = Sha256::digest(key.as_bytes());
    let unbound = UnboundKey::new(&AES_256_GCM, digest.as_slice())
        .map_err(|_| CipherError::InvalidKey("Failed to build AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

impl TokenCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str, key: &str) -> Result<String, CipherError> {
        let key = derive_key(key)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        SystemRandom::new()
            .fill(&mut nonce_bytes)
            .map_err(|_| CipherError::Crypto("Failed to generate nonce".to_string()))?;

        let mut in_out = plaintext.as_bytes().to_vec();
        key.seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::empty(),
            &mut in_out,
        )
        .map_err(|_| CipherError::Crypto("Failed to seal token".to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + in_out.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&in_out);
        Ok(base64url_encode(sealed))
    }

    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<String, CipherError> {
        let key = derive_key(key)?;

        let sealed =
            base64url_decode(ciphertext).map_err(|e| CipherError::Malformed(e.to_string()))?;
        if sealed.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(CipherError::Malformed("Ciphertext too short".to_string()));
        }

        let (nonce_bytes, body) = sealed.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| CipherError::Malformed("Invalid nonce".to_string()))?;

        let mut in_out = body.to_vec();
        let plaintext = key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| CipherError::Decrypt("Authentication tag mismatch".to_string()))?;

        String::from_utf8(plaintext.to_vec())
            .map_err(|_| CipherError::Malformed("Plaintext is not valid UTF-8".to_string()))
    }
}
