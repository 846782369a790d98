use std::fmt;

use nom::number::complete::be_u8;
use nom::IResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVersion {
    #[default]
    V1,
    Unknown(u8),
}

impl ProtocolVersion {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x01 => ProtocolVersion::V1,
            _ => ProtocolVersion::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ProtocolVersion::V1 => 0x01,
            ProtocolVersion::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ProtocolVersion> {
        let (input, value) = be_u8(input)?;
        Ok((input, ProtocolVersion::from_u8(value)))
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V1 => write!(f, "SimSSL 1"),
            ProtocolVersion::Unknown(v) => write!(f, "Unknown({})", v),
        }
    }
}
