use nom::bytes::complete::take;
use nom::number::complete::be_i64;
use nom::IResult;

use super::Id;
use crate::crypto::NONCE_LEN;

/// Server answer to a ClientHello.
///
/// Echoes the client's ID and expiration, and carries the decrypted nonce as
/// proof that the server holds the session key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello {
    pub client_id: Id,
    pub server_id: Id,
    pub expiration_time: i64,
    /// Plaintext nonce.
    pub random_init: [u8; NONCE_LEN],
}

impl ServerHello {
    pub fn new(
        client_id: Id,
        server_id: Id,
        expiration_time: i64,
        random_init: [u8; NONCE_LEN],
    ) -> Self {
        ServerHello {
            client_id,
            server_id,
            expiration_time,
            random_init,
        }
    }

    pub const fn encoded_len() -> usize {
        Id::LEN * 2 + 8 + NONCE_LEN
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ServerHello> {
        let (input, client_id) = Id::parse(input)?;
        let (input, server_id) = Id::parse(input)?;
        let (input, expiration_time) = be_i64(input)?;
        let (input, random) = take(NONCE_LEN)(input)?;

        let mut random_init = [0u8; NONCE_LEN];
        random_init.copy_from_slice(random);

        Ok((
            input,
            ServerHello {
                client_id,
                server_id,
                expiration_time,
                random_init,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        self.client_id.serialize(output);
        self.server_id.serialize(output);
        output.extend_from_slice(&self.expiration_time.to_be_bytes());
        output.extend_from_slice(&self.random_init);
    }
}
