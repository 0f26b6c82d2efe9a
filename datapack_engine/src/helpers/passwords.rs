//! Password credential handling.
//!
//! Credentials are stored as `pbkdf2_sha256$<salt>$<derived key hex>` strings: PBKDF2-HMAC-SHA256 with 120,000
//! iterations over a random 16-byte salt. The format is shared with the previous generation of the gateway, so
//! existing password hashes keep working.

use pbkdf2::pbkdf2_hmac_array;
use rand::Rng;
use sha2::Sha256;

const ALGORITHM_TAG: &str = "pbkdf2_sha256";
const ITERATIONS: u32 = 120_000;
const KEY_LENGTH: usize = 32;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn derive_key(password: &str, salt: &str, iterations: u32) -> [u8; KEY_LENGTH] {
    pbkdf2_hmac_array::<Sha256, KEY_LENGTH>(password.as_bytes(), salt.as_bytes(), iterations)
}

fn hash_with_salt(password: &str, salt: &str) -> String {
    let dk = derive_key(password, salt, ITERATIONS);
    format!("{ALGORITHM_TAG}${salt}${}", to_hex(&dk))
}

/// Hashes a password with a fresh random salt, producing the storable credential string.
pub fn hash_password(password: &str) -> String {
    let salt_bytes: [u8; 16] = rand::thread_rng().gen();
    hash_with_salt(password, &to_hex(&salt_bytes))
}

/// Verifies a password against a stored credential string. Malformed or foreign-format credentials verify as
/// false rather than erroring; a login attempt against a corrupt row must simply fail.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (algo, salt, digest) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(s), Some(d)) => (a, s, d),
        _ => return false,
    };
    if algo != ALGORITHM_TAG {
        return false;
    }
    let check = to_hex(&derive_key(password, salt, ITERATIONS));
    // constant-time comparison
    if check.len() != digest.len() {
        return false;
    }
    check.bytes().zip(digest.bytes()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

/// Generates a numeric password. Digits only: the operators relay these to customers over the phone.
pub fn generate_numeric_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let stored = hash_password("s3cret!");
        assert!(stored.starts_with("pbkdf2_sha256$"));
        assert!(verify_password("s3cret!", &stored));
        assert!(!verify_password("s3cret", &stored));
    }

    #[test]
    fn derivation_matches_the_published_vectors() {
        // PBKDF2-HMAC-SHA256, P="passwd", S="salt", c=1 (RFC 7914 §11, first 32 bytes)
        let dk = derive_key("passwd", "salt", 1);
        assert_eq!(to_hex(&dk), "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc");
        // P="Password", S="NaCl", c=80000 (RFC 7914 §11, first 32 bytes)
        let dk = derive_key("Password", "NaCl", 80_000);
        assert_eq!(to_hex(&dk), "4ddcd8f60b98be21830cee5ef22701f9641a4418d04c0414aeff08876b34ab56");
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn malformed_credentials_never_verify() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "plaintext"));
        assert!(!verify_password("pw", "md5$abc$def"));
    }

    #[test]
    fn numeric_passwords() {
        let pw = generate_numeric_password(6);
        assert_eq!(pw.len(), 6);
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }
}
