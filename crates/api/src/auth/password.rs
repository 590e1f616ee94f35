use rand::RngCore;
use scrypt::Params;
use subtle::ConstantTimeEq;

use crate::error::AppError;

// Commodity scrypt parameters: N = 2^14, r = 8, p = 1, 64-byte key.
const LOG_N: u8 = 14;
const R: u32 = 8;
const P: u32 = 1;
const KEY_LEN: usize = 64;
const SALT_LEN: usize = 16;

fn params() -> Result<Params, scrypt::errors::InvalidParams> {
    Params::new(LOG_N, R, P, KEY_LEN)
}

/// Derives a salted hash, returned as `hex(key) + "." + hex(salt)`. Each
/// call draws a fresh salt, so hashing the same password twice yields
/// different stored strings.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LEN];
    let params =
        params().map_err(|e| AppError::Internal(format!("invalid scrypt parameters: {e}")))?;
    scrypt::scrypt(password.as_bytes(), &salt, &params, &mut key)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;

    Ok(format!("{}.{}", hex::encode(key), hex::encode(salt)))
}

/// Re-derives with the stored salt and compares in constant time. Fails
/// closed on malformed input: a stored string this function cannot parse
/// verifies as false, never as an error.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((hash_hex, salt_hex)) = stored.split_once('.') else {
        return false;
    };
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    if expected.len() != KEY_LEN {
        return false;
    }

    let Ok(params) = params() else {
        return false;
    };
    let mut derived = [0u8; KEY_LEN];
    if scrypt::scrypt(password.as_bytes(), &salt, &params, &mut derived).is_err() {
        return false;
    }

    derived.ct_eq(&expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let stored = hash_password("Secret1").unwrap();
        assert!(verify_password("Secret1", &stored));
        assert!(!verify_password("Secret2", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Secret1").unwrap();
        let b = hash_password("Secret1").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("Secret1", &a));
        assert!(verify_password("Secret1", &b));
    }

    #[test]
    fn stored_format_is_hex_dot_hex() {
        let stored = hash_password("Secret1").unwrap();
        let (hash, salt) = stored.split_once('.').unwrap();
        assert_eq!(hash.len(), KEY_LEN * 2);
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn malformed_stored_fails_closed() {
        assert!(!verify_password("Secret1", ""));
        assert!(!verify_password("Secret1", "no-separator"));
        assert!(!verify_password("Secret1", "zz.zz"));
        assert!(!verify_password("Secret1", "abcd.1234"));
        assert!(!verify_password("Secret1", ".deadbeef"));
    }
}
