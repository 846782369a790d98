//! Cryptographic primitives used by the SimSSL handshake.
//!
//! AES-128-CBC with PKCS#5 padding for the nonce, SHA-256 for identities.

mod aes_cbc;
mod hash;
mod key;

pub use aes_cbc::{decrypt, decrypt_with_iv, encrypt, encrypt_with_iv};
pub use aes_cbc::{BLOCK_SIZE, IV_LEN, KEY_LEN};
pub use hash::sha256;
pub use key::{SessionKey, NONCE_LEN};
