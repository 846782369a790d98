use nom::IResult;

use super::Id;

/// Sent by a client that rejected the server's hello.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientFailed {
    pub client_id: Id,
    pub server_id: Id,
}

impl ClientFailed {
    pub fn new(client_id: Id, server_id: Id) -> Self {
        ClientFailed {
            client_id,
            server_id,
        }
    }

    pub const fn encoded_len() -> usize {
        Id::LEN * 2
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ClientFailed> {
        let (input, client_id) = Id::parse(input)?;
        let (input, server_id) = Id::parse(input)?;
        Ok((
            input,
            ClientFailed {
                client_id,
                server_id,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        self.client_id.serialize(output);
        self.server_id.serialize(output);
    }
}
