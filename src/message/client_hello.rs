use nom::bytes::complete::take;
use nom::number::complete::be_i64;
use nom::IResult;

use super::Id;
use crate::crypto::{SessionKey, IV_LEN, KEY_LEN, NONCE_LEN};
use crate::types::CipherSuite;

/// First packet of a handshake, sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    pub client_id: Id,
    /// `Id::unknown()` until the client learns who the server is.
    pub server_id: Id,
    /// Unix seconds after which the session is stale.
    pub expiration_time: i64,
    /// First 32 bytes of the encrypted nonce.
    pub random_init: [u8; NONCE_LEN],
    pub session_key: SessionKey,
}

impl ClientHello {
    pub fn new(
        client_id: Id,
        server_id: Id,
        expiration_time: i64,
        random_init: [u8; NONCE_LEN],
        session_key: SessionKey,
    ) -> Self {
        ClientHello {
            client_id,
            server_id,
            expiration_time,
            random_init,
            session_key,
        }
    }

    /// Body length on the wire, without the packet header.
    pub fn encoded_len(cipher_suite: CipherSuite) -> usize {
        let iv = if cipher_suite.has_explicit_iv() {
            IV_LEN
        } else {
            0
        };
        Id::LEN * 2 + 8 + NONCE_LEN + KEY_LEN + iv
    }

    /// Recover the plaintext nonce with the carried key.
    pub fn open_nonce(&self) -> Result<[u8; NONCE_LEN], crate::Error> {
        self.session_key.open_nonce(&self.random_init)
    }

    pub fn parse(input: &[u8], cipher_suite: CipherSuite) -> IResult<&[u8], ClientHello> {
        let (input, client_id) = Id::parse(input)?;
        let (input, server_id) = Id::parse(input)?;
        let (input, expiration_time) = be_i64(input)?;
        let (input, random) = take(NONCE_LEN)(input)?;
        let (input, key) = take(KEY_LEN)(input)?;

        let (input, session_key) = if cipher_suite.has_explicit_iv() {
            let (input, iv) = take(IV_LEN)(input)?;
            // unwrap() is ok because take() returned exact lengths.
            (input, SessionKey::with_iv(key, iv).unwrap())
        } else {
            (input, SessionKey::new(key).unwrap())
        };

        let mut random_init = [0u8; NONCE_LEN];
        random_init.copy_from_slice(random);

        Ok((
            input,
            ClientHello {
                client_id,
                server_id,
                expiration_time,
                random_init,
                session_key,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        self.client_id.serialize(output);
        self.server_id.serialize(output);
        output.extend_from_slice(&self.expiration_time.to_be_bytes());
        output.extend_from_slice(&self.random_init);
        output.extend_from_slice(self.session_key.key());
        if let Some(iv) = self.session_key.explicit_iv() {
            output.extend_from_slice(iv);
        }
    }
}
