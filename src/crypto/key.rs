use std::fmt;

use zeroize::Zeroize;

use super::aes_cbc::{decrypt_raw, decrypt_with_iv, encrypt_with_iv, IV_LEN, KEY_LEN};
use crate::rng::SeededRng;
use crate::types::CipherSuite;
use crate::Error;

/// Length of the handshake nonce (RandomInit).
pub const NONCE_LEN: usize = 32;

/// Symmetric session key generated by the client.
///
/// For [`CipherSuite::Aes128Cbc`] the key doubles as CBC IV. For
/// [`CipherSuite::Aes128CbcExplicitIv`] an independent IV is kept alongside.
/// Key material is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey {
    key: [u8; KEY_LEN],
    iv: Option<[u8; IV_LEN]>,
}

impl SessionKey {
    /// Key for the legacy suite, where the key is also the IV.
    ///
    /// Fails with [`Error::CryptoKeyError`] unless `key` is exactly 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        Ok(SessionKey {
            key: key.try_into().map_err(|_| Error::CryptoKeyError(key.len()))?,
            iv: None,
        })
    }

    /// Key with an independent IV.
    pub fn with_iv(key: &[u8], iv: &[u8]) -> Result<Self, Error> {
        let mut session_key = Self::new(key)?;
        session_key.iv = Some(iv.try_into().map_err(|_| Error::InvalidIvLength(iv.len()))?);
        Ok(session_key)
    }

    /// Generate fresh key material for `suite`.
    pub fn generate(suite: CipherSuite, rng: &mut SeededRng) -> Result<Self, Error> {
        match suite {
            CipherSuite::Aes128Cbc => Ok(SessionKey {
                key: rng.random_array(),
                iv: None,
            }),
            CipherSuite::Aes128CbcExplicitIv => Ok(SessionKey {
                key: rng.random_array(),
                iv: Some(rng.random_array()),
            }),
            CipherSuite::Unknown(method, mode) => Err(Error::UnsupportedCipherSuite(
                method.as_u8(),
                mode.as_u8(),
            )),
        }
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// The IV used for CBC, which is the key itself unless an explicit IV is set.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        self.iv.as_ref().unwrap_or(&self.key)
    }

    pub fn explicit_iv(&self) -> Option<&[u8; IV_LEN]> {
        self.iv.as_ref()
    }

    pub fn cipher_suite(&self) -> CipherSuite {
        if self.iv.is_some() {
            CipherSuite::Aes128CbcExplicitIv
        } else {
            CipherSuite::Aes128Cbc
        }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        encrypt_with_iv(plaintext, &self.key, self.iv())
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        decrypt_with_iv(ciphertext, &self.key, self.iv())
    }

    /// Encrypt a nonce and keep the first 32 bytes of ciphertext.
    ///
    /// The PKCS#5 block that follows is dropped; the wire only has room for
    /// the nonce itself.
    pub fn seal_nonce(&self, nonce: &[u8; NONCE_LEN]) -> Result<[u8; NONCE_LEN], Error> {
        let ciphertext = self.encrypt(nonce)?;

        let mut sealed = [0u8; NONCE_LEN];
        sealed.copy_from_slice(&ciphertext[..NONCE_LEN]);
        Ok(sealed)
    }

    /// Recover the plaintext nonce from a sealed nonce.
    ///
    /// The sealed nonce is two whole blocks of ciphertext with the padding
    /// block cut off, so it is decrypted without unpadding. A nonce ending
    /// in bytes that look like PKCS#5 padding comes back intact.
    pub fn open_nonce(&self, sealed: &[u8; NONCE_LEN]) -> Result<[u8; NONCE_LEN], Error> {
        let plaintext = decrypt_raw(sealed, &self.key, self.iv())?;

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&plaintext);
        Ok(nonce)
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.key.zeroize();
        if let Some(iv) = self.iv.as_mut() {
            iv.zeroize();
        }
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("suite", &self.cipher_suite())
            .finish_non_exhaustive()
    }
}
