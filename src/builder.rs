//! Constructors for the four SimSSL packets.
//!
//! All of them are pure: randomness and time come in as arguments and every
//! call returns a fresh packet.

use std::time::SystemTime;

use crate::crypto::{SessionKey, NONCE_LEN};
use crate::message::{Body, ClientFailed, ClientHello, Id, Packet, ServerErase, ServerHello};
use crate::rng::SeededRng;
use crate::time_tricks::SystemTimeExt;
use crate::types::CipherSuite;
use crate::{Config, Error};

/// Build a ClientHello for `client_identity`.
///
/// ServerID is the digest of `"unknown"` and ExpirationTime is `now` plus the
/// configured lifetime (24 hours by default). A fresh nonce and session key
/// are drawn from `rng`, and the nonce is encrypted with that key.
pub fn build_client_hello(
    client_identity: &[u8],
    config: &Config,
    rng: &mut SeededRng,
    now: SystemTime,
) -> Result<Packet, Error> {
    let session_key = SessionKey::generate(config.cipher_suite(), rng)?;
    let nonce: [u8; NONCE_LEN] = rng.random_array();

    let lifetime = config.expiration_lifetime().as_secs() as i64;
    let expiration_time = now.to_unix_secs().saturating_add(lifetime);

    seal_client_hello(client_identity, &nonce, session_key, expiration_time)
}

/// Build a ClientHello from caller supplied nonce and key.
pub fn seal_client_hello(
    client_identity: &[u8],
    nonce: &[u8; NONCE_LEN],
    session_key: SessionKey,
    expiration_time: i64,
) -> Result<Packet, Error> {
    let random_init = session_key.seal_nonce(nonce)?;

    let hello = ClientHello::new(
        Id::digest(client_identity),
        Id::unknown(),
        expiration_time,
        random_init,
        session_key,
    );

    Ok(Packet::new(
        hello.session_key.cipher_suite(),
        Body::ClientHello(hello),
    ))
}

/// Build a ServerHello answering a ClientHello.
///
/// `nonce_ciphertext` is decrypted with `session_key` (also used as IV) and
/// sent back in plaintext. `expiration_time` is echoed as received.
///
/// Fails with [`Error::CryptoKeyError`] unless `session_key` is 16 bytes.
pub fn build_server_hello(
    client_id: Id,
    server_identity: &[u8],
    nonce_ciphertext: &[u8; NONCE_LEN],
    session_key: &[u8],
    expiration_time: i64,
) -> Result<Packet, Error> {
    let session_key = SessionKey::new(session_key)?;
    open_server_hello(
        client_id,
        server_identity,
        nonce_ciphertext,
        &session_key,
        expiration_time,
    )
}

/// Build a ServerHello straight from a received ClientHello.
///
/// Unlike [`build_server_hello`] this honours an explicit IV.
pub fn build_server_hello_for(
    client_hello: &ClientHello,
    server_identity: &[u8],
) -> Result<Packet, Error> {
    open_server_hello(
        client_hello.client_id,
        server_identity,
        &client_hello.random_init,
        &client_hello.session_key,
        client_hello.expiration_time,
    )
}

fn open_server_hello(
    client_id: Id,
    server_identity: &[u8],
    nonce_ciphertext: &[u8; NONCE_LEN],
    session_key: &SessionKey,
    expiration_time: i64,
) -> Result<Packet, Error> {
    let random_init = session_key.open_nonce(nonce_ciphertext)?;

    let hello = ServerHello::new(
        client_id,
        Id::digest(server_identity),
        expiration_time,
        random_init,
    );

    Ok(Packet::new(
        session_key.cipher_suite(),
        Body::ServerHello(hello),
    ))
}

/// Build a ClientFailed: the client rejected the server's hello.
pub fn build_client_failed(client_identity: &[u8], server_identity: &[u8]) -> Packet {
    let failed = ClientFailed::new(Id::digest(client_identity), Id::digest(server_identity));
    Packet::new(CipherSuite::default(), Body::ClientFailed(failed))
}

/// Build a ServerErase: the server dropped its session state for `client_id`.
pub fn build_server_erase(client_id: Id, server_identity: &[u8]) -> Packet {
    let erase = ServerErase::new(client_id, Id::digest(server_identity));
    Packet::new(CipherSuite::default(), Body::ServerErase(erase))
}
