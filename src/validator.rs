//! The admission decision of a handshake.

use std::time::SystemTime;

use subtle::ConstantTimeEq;

use crate::message::{ClientHello, Packet, ServerHello};
use crate::time_tricks::SystemTimeExt;

/// Decide whether `remote` proves possession of the key in `local`.
///
/// `local` is the ClientHello that was sent, `remote` the ServerHello that
/// came back. True iff the ClientIDs match, the ExpirationTimes match and the
/// nonce decrypted from `local` equals the plaintext nonce in `remote`.
///
/// Any other packet kind, mismatch or decryption failure gives false.
/// Expiration is only compared between the two packets, see [`is_expired`]
/// for the check against the clock.
pub fn check_key(local: &Packet, remote: &Packet) -> bool {
    let (Some(client_hello), Some(server_hello)) =
        (local.as_client_hello(), remote.as_server_hello())
    else {
        debug!(
            "Key check needs ClientHello and ServerHello, got {} and {}",
            local.content_type(),
            remote.content_type()
        );
        return false;
    };

    check_hello(client_hello, server_hello)
}

/// [`check_key`] on the message bodies.
pub fn check_hello(local: &ClientHello, remote: &ServerHello) -> bool {
    if local.client_id != remote.client_id {
        debug!(
            "ClientID mismatch: {:?} != {:?}",
            local.client_id, remote.client_id
        );
        return false;
    }

    if local.expiration_time != remote.expiration_time {
        debug!(
            "ExpirationTime mismatch: {} != {}",
            local.expiration_time, remote.expiration_time
        );
        return false;
    }

    let nonce = match local.open_nonce() {
        Ok(v) => v,
        Err(e) => {
            debug!("Failed to decrypt nonce: {}", e);
            return false;
        }
    };

    if !bool::from(nonce[..].ct_eq(&remote.random_init[..])) {
        debug!("Nonce mismatch for {:?}", local.client_id);
        return false;
    }

    true
}

/// Whether a session with `expiration_time` is stale at `now`.
pub fn is_expired(expiration_time: i64, now: SystemTime) -> bool {
    now.to_unix_secs() >= expiration_time
}
