use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::Error;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES-128 key length in bytes.
pub const KEY_LEN: usize = 16;

/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// Encrypt with AES-128-CBC and PKCS#5 padding, using the key as IV.
///
/// This is the wire-compatible mode of the protocol. Reusing the key as IV
/// is weak; [`encrypt_with_iv`] takes an independent IV.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    check_key(key)?;
    encrypt_with_iv(plaintext, key, &key[..IV_LEN])
}

/// Decrypt AES-128-CBC using the key as IV, then strip PKCS#5 padding leniently.
///
/// See [`decrypt_with_iv`] for the padding rule.
pub fn decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    check_key(key)?;
    decrypt_with_iv(ciphertext, key, &key[..IV_LEN])
}

/// Encrypt with AES-128-CBC and PKCS#5 padding under an explicit IV.
pub fn encrypt_with_iv(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = encryptor(key, iv)?;

    let mut buffer = pkcs5_pad(plaintext);
    let len = buffer.len();

    cipher
        .encrypt_padded_mut::<NoPadding>(&mut buffer, len)
        .map_err(|_| Error::CiphertextLength(len))?;

    Ok(buffer)
}

/// Decrypt AES-128-CBC under an explicit IV.
///
/// After decryption the last byte is read as a pad length `p`. If `p` is
/// larger than the block size, or the last `p` bytes are not all `p`, the
/// buffer is returned as is. The caller may hand in ciphertext that was
/// never padded (e.g. a truncated nonce), so a bad pad is not an error.
pub fn decrypt_with_iv(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
    let mut buffer = decrypt_raw(ciphertext, key, iv)?;
    pkcs5_unpad_lenient(&mut buffer);
    Ok(buffer)
}

/// Decrypt AES-128-CBC under an explicit IV, leaving any padding in place.
pub(crate) fn decrypt_raw(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
    let cipher = decryptor(key, iv)?;

    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::CiphertextLength(ciphertext.len()));
    }

    let mut buffer = ciphertext.to_vec();
    if buffer.is_empty() {
        return Ok(buffer);
    }

    cipher
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|_| Error::CiphertextLength(ciphertext.len()))?;

    Ok(buffer)
}

/// Append `n` bytes of value `n`, where `n` is in `1..=BLOCK_SIZE`.
pub(crate) fn pkcs5_pad(data: &[u8]) -> Vec<u8> {
    let padding = BLOCK_SIZE - data.len() % BLOCK_SIZE;

    let mut out = Vec::with_capacity(data.len() + padding);
    out.extend_from_slice(data);
    out.resize(data.len() + padding, padding as u8);
    out
}

/// Strip PKCS#5 padding if it is well formed. Returns whether anything was stripped.
pub(crate) fn pkcs5_unpad_lenient(data: &mut Vec<u8>) -> bool {
    let Some(&last) = data.last() else {
        return false;
    };

    let padding = last as usize;
    if padding == 0 || padding > BLOCK_SIZE || padding > data.len() {
        trace!("No PKCS#5 padding, pad byte {}", last);
        return false;
    }

    let start = data.len() - padding;
    if data[start..].iter().any(|b| *b != last) {
        trace!("Malformed PKCS#5 padding of length {}, keeping buffer", padding);
        return false;
    }

    data.truncate(start);
    true
}

fn check_key(key: &[u8]) -> Result<(), Error> {
    if key.len() != KEY_LEN {
        return Err(Error::CryptoKeyError(key.len()));
    }
    Ok(())
}

fn check_iv(iv: &[u8]) -> Result<(), Error> {
    if iv.len() != IV_LEN {
        return Err(Error::InvalidIvLength(iv.len()));
    }
    Ok(())
}

fn encryptor(key: &[u8], iv: &[u8]) -> Result<Aes128CbcEnc, Error> {
    check_key(key)?;
    check_iv(iv)?;
    Aes128CbcEnc::new_from_slices(key, iv).map_err(|_| Error::CryptoKeyError(key.len()))
}

fn decryptor(key: &[u8], iv: &[u8]) -> Result<Aes128CbcDec, Error> {
    check_key(key)?;
    check_iv(iv)?;
    Aes128CbcDec::new_from_slices(key, iv).map_err(|_| Error::CryptoKeyError(key.len()))
}
