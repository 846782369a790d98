use std::fmt;

use nom::number::complete::be_u8;
use nom::IResult;

/// Cipher identifier on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Aes128,
    Unknown(u8),
}

impl Method {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Method::Aes128,
            _ => Method::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Method::Aes128 => 0x01,
            Method::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Method> {
        let (input, value) = be_u8(input)?;
        Ok((input, Method::from_u8(value)))
    }
}

/// Block mode identifier on the wire.
///
/// Ids 0x01-0x05 are reserved by the protocol but only CBC is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    /// CBC with the session key reused as IV.
    Cbc,
    Ctr,
    Cfb,
    Ofb,
    /// CBC with an independent IV carried in the ClientHello.
    CbcExplicitIv,
    Unknown(u8),
}

impl Mode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Mode::Ecb,
            0x02 => Mode::Cbc,
            0x03 => Mode::Ctr,
            0x04 => Mode::Cfb,
            0x05 => Mode::Ofb,
            0x06 => Mode::CbcExplicitIv,
            _ => Mode::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Mode::Ecb => 0x01,
            Mode::Cbc => 0x02,
            Mode::Ctr => 0x03,
            Mode::Cfb => 0x04,
            Mode::Ofb => 0x05,
            Mode::CbcExplicitIv => 0x06,
            Mode::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Mode> {
        let (input, value) = be_u8(input)?;
        Ok((input, Mode::from_u8(value)))
    }
}

/// The (Method, Mode) pair of a packet.
///
/// Only the AES-128-CBC family is supported. Any other pair parses into
/// `Unknown` so that the raw bytes survive a roundtrip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherSuite {
    /// AES-128-CBC, IV = key. The legacy wire-compatible suite.
    #[default]
    Aes128Cbc,
    /// AES-128-CBC with an explicit random IV.
    Aes128CbcExplicitIv,
    Unknown(Method, Mode),
}

impl CipherSuite {
    pub fn from_parts(method: Method, mode: Mode) -> Self {
        match (method, mode) {
            (Method::Aes128, Mode::Cbc) => CipherSuite::Aes128Cbc,
            (Method::Aes128, Mode::CbcExplicitIv) => CipherSuite::Aes128CbcExplicitIv,
            _ => CipherSuite::Unknown(method, mode),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            CipherSuite::Aes128Cbc | CipherSuite::Aes128CbcExplicitIv => Method::Aes128,
            CipherSuite::Unknown(method, _) => *method,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            CipherSuite::Aes128Cbc => Mode::Cbc,
            CipherSuite::Aes128CbcExplicitIv => Mode::CbcExplicitIv,
            CipherSuite::Unknown(_, mode) => *mode,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CipherSuite::Unknown(_, _))
    }

    /// Whether the ClientHello carries an IV after the key.
    pub fn has_explicit_iv(&self) -> bool {
        matches!(self, CipherSuite::Aes128CbcExplicitIv)
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], CipherSuite> {
        let (input, method) = Method::parse(input)?;
        let (input, mode) = Mode::parse(input)?;
        Ok((input, CipherSuite::from_parts(method, mode)))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.push(self.method().as_u8());
        output.push(self.mode().as_u8());
    }

    pub fn all() -> &'static [CipherSuite] {
        &[CipherSuite::Aes128Cbc, CipherSuite::Aes128CbcExplicitIv]
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherSuite::Aes128Cbc => write!(f, "AES-128-CBC"),
            CipherSuite::Aes128CbcExplicitIv => write!(f, "AES-128-CBC-IV"),
            CipherSuite::Unknown(method, mode) => {
                write!(f, "Unknown({}, {})", method.as_u8(), mode.as_u8())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_suite_bytes() {
        let mut out = Vec::new();
        CipherSuite::Aes128Cbc.serialize(&mut out);
        assert_eq!(out, [0x01, 0x02]);
    }

    #[test]
    fn unsupported_modes_are_preserved() {
        let (_, suite) = CipherSuite::parse(&[0x01, 0x03]).unwrap();
        assert_eq!(suite, CipherSuite::Unknown(Method::Aes128, Mode::Ctr));
        assert!(!suite.is_supported());

        let mut out = Vec::new();
        suite.serialize(&mut out);
        assert_eq!(out, [0x01, 0x03]);
    }

    #[test]
    fn all_are_supported() {
        for suite in CipherSuite::all() {
            assert!(suite.is_supported());
            assert_eq!(CipherSuite::from_parts(suite.method(), suite.mode()), *suite);
        }
        assert!(CipherSuite::Aes128CbcExplicitIv.has_explicit_iv());
        assert!(!CipherSuite::Aes128Cbc.has_explicit_iv());
    }
}
