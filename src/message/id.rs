use std::fmt;
use std::ops::Deref;

use nom::bytes::complete::take;
use nom::IResult;

use crate::crypto::sha256;

/// Identity placeholder hashed into the ServerID of a ClientHello.
pub const UNKNOWN_IDENTITY: &[u8] = b"unknown";

/// SHA-256 digest of a client or server identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Id([u8; 32]);

impl Id {
    pub const LEN: usize = 32;

    pub fn new(digest: [u8; 32]) -> Self {
        Id(digest)
    }

    /// Hash a raw identity string.
    pub fn digest(identity: &[u8]) -> Self {
        Id(sha256(identity))
    }

    /// ServerID sent by a client that does not know the server yet.
    pub fn unknown() -> Self {
        Self::digest(UNKNOWN_IDENTITY)
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Id> {
        let (input, data) = take(Self::LEN)(input)?;
        let mut digest = [0u8; 32];
        digest.copy_from_slice(data);
        Ok((input, Id(digest)))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&self.0);
    }
}

impl Deref for Id {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; 32]> for Id {
    fn from(value: [u8; 32]) -> Self {
        Id(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Eight bytes are plenty to tell identities apart in logs.
        write!(f, "Id(")?;
        for b in &self.0[..8] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "..)")
    }
}
