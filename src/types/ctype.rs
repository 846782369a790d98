use std::fmt;

use nom::number::complete::be_u8;
use nom::IResult;

/// Kind of a SimSSL packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Client opens a session.
    ClientHello,
    /// Server proves possession of the session key.
    ServerHello,
    /// Client rejected the server's hello.
    ClientFailed,
    /// Server erased the session state for a client.
    ServerErase,
    Unknown(u8),
}

impl Default for ContentType {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl ContentType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x01 => ContentType::ClientHello,
            0x02 => ContentType::ServerHello,
            0x03 => ContentType::ClientFailed,
            0x04 => ContentType::ServerErase,
            _ => ContentType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ContentType::ClientHello => 0x01,
            ContentType::ServerHello => 0x02,
            ContentType::ClientFailed => 0x03,
            ContentType::ServerErase => 0x04,
            ContentType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ContentType> {
        let (input, value) = be_u8(input)?;
        Ok((input, ContentType::from_u8(value)))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::ClientHello => write!(f, "ClientHello"),
            ContentType::ServerHello => write!(f, "ServerHello"),
            ContentType::ClientFailed => write!(f, "ClientFailed"),
            ContentType::ServerErase => write!(f, "ServerErase"),
            ContentType::Unknown(v) => write!(f, "Unknown({})", v),
        }
    }
}
