//! RFC 5802 SCRAM verifier derivation.
//!
//! Turns a plaintext password into the `v=1,i=...,s=...,sk=...,sv=...`
//! verifier string the IRC services daemon loads for SASL SCRAM. The
//! plaintext is never stored; verifiers are derived fresh per login.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::RngExt;
use sha2::{Digest, Sha256, Sha512};

/// RFC 7677 floor; lower caller values are raised, never honored.
pub const MIN_ITERATIONS: u32 = 4096;
/// Minimum salt length in bytes.
pub const MIN_SALT_LEN: usize = 16;

/// Attempt budget for [`sasl_safe_salt`].
const SALT_ATTEMPTS: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ScramError {
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("no salt without '+' or '/' found within {SALT_ATTEMPTS} attempts")]
    SaltEncoding,
}

/// Hash algorithm backing the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScramAlgorithm {
    Sha256,
    Sha512,
}

impl ScramAlgorithm {
    /// Suffix used in SASL mechanism names, e.g. `SCRAM-SHA-256`.
    pub fn mechanism_suffix(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        }
    }
}

/// Derive a SCRAM verifier string for `password`.
///
/// Iterations and salt length are clamped up to their floors rather than
/// rejected. The only failure paths are an empty password and salt
/// generation exhausting its attempt budget.
pub fn derive_verifier(
    password: &str,
    algorithm: ScramAlgorithm,
    iterations: u32,
    salt_len: usize,
) -> Result<String, ScramError> {
    if password.is_empty() {
        return Err(ScramError::EmptyPassword);
    }
    let iterations = iterations.max(MIN_ITERATIONS);
    let salt = sasl_safe_salt(salt_len.max(MIN_SALT_LEN))?;
    Ok(derive_with_salt(password, algorithm, iterations, &salt))
}

/// Random salt whose standard base64 encoding contains neither `+` nor `/`.
///
/// Some SASL client implementations mishandle those characters inside the
/// server-first `s=` attribute. This is a client-bug workaround, not a
/// cryptographic requirement; delete once those clients are fixed.
fn sasl_safe_salt(salt_len: usize) -> Result<Vec<u8>, ScramError> {
    let mut rng = rand::rng();
    for _ in 0..SALT_ATTEMPTS {
        let salt: Vec<u8> = (0..salt_len).map(|_| rng.random::<u8>()).collect();
        let encoded = BASE64.encode(&salt);
        if !encoded.contains('+') && !encoded.contains('/') {
            return Ok(salt);
        }
    }
    Err(ScramError::SaltEncoding)
}

/// Deterministic derivation given an explicit salt. Split out from
/// [`derive_verifier`] so interoperability can be checked against fixed
/// vectors.
fn derive_with_salt(
    password: &str,
    algorithm: ScramAlgorithm,
    iterations: u32,
    salt: &[u8],
) -> String {
    let (stored_key, server_key) = match algorithm {
        ScramAlgorithm::Sha256 => {
            let mut salted = [0u8; 32];
            pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut salted);
            let client_key = hmac_sha256(&salted, b"Client Key");
            let stored_key = Sha256::digest(&client_key).to_vec();
            let server_key = hmac_sha256(&salted, b"Server Key");
            (stored_key, server_key)
        }
        ScramAlgorithm::Sha512 => {
            let mut salted = [0u8; 64];
            pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, iterations, &mut salted);
            let client_key = hmac_sha512(&salted, b"Client Key");
            let stored_key = Sha512::digest(&client_key).to_vec();
            let server_key = hmac_sha512(&salted, b"Server Key");
            (stored_key, server_key)
        }
    };

    format!(
        "v=1,i={iterations},s={},sk={},sv={}",
        BASE64.encode(salt),
        BASE64.encode(&stored_key),
        BASE64.encode(&server_key),
    )
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac =
        <Hmac<Sha256> as Mac>::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac =
        <Hmac<Sha512> as Mac>::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
