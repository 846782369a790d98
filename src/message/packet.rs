use nom::number::complete::be_u16;
use nom::IResult;

use super::{ClientFailed, ClientHello, Id, ServerErase, ServerHello};
use crate::checksum;
use crate::types::{CipherSuite, ContentType, ProtocolVersion};
use crate::Error;

/// Size of the fixed packet header.
pub const HEADER_LEN: usize = 8;

/// Byte offset of the checksum field within a packet.
pub const CHECKSUM_OFFSET: usize = 6;

/// Fixed header in front of every packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub content_type: ContentType,
    pub version: ProtocolVersion,
    pub length: u16,
    pub cipher_suite: CipherSuite,
    pub checksum: u16,
}

impl Header {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Header> {
        let (input, content_type) = ContentType::parse(input)?;
        let (input, version) = ProtocolVersion::parse(input)?;
        let (input, length) = be_u16(input)?;
        let (input, cipher_suite) = CipherSuite::parse(input)?;
        let (input, checksum) = be_u16(input)?;

        Ok((
            input,
            Header {
                content_type,
                version,
                length,
                cipher_suite,
                checksum,
            },
        ))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.push(self.content_type.as_u8());
        output.push(self.version.as_u8());
        output.extend_from_slice(&self.length.to_be_bytes());
        self.cipher_suite.serialize(output);
        output.extend_from_slice(&self.checksum.to_be_bytes());
    }
}

/// Packet body, one case per content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    ClientHello(ClientHello),
    ServerHello(ServerHello),
    ClientFailed(ClientFailed),
    ServerErase(ServerErase),
}

impl Body {
    pub fn content_type(&self) -> ContentType {
        match self {
            Body::ClientHello(_) => ContentType::ClientHello,
            Body::ServerHello(_) => ContentType::ServerHello,
            Body::ClientFailed(_) => ContentType::ClientFailed,
            Body::ServerErase(_) => ContentType::ServerErase,
        }
    }

    /// Body length for a content type, or `None` for unknown content types.
    pub fn encoded_len(content_type: ContentType, cipher_suite: CipherSuite) -> Option<usize> {
        let len = match content_type {
            ContentType::ClientHello => ClientHello::encoded_len(cipher_suite),
            ContentType::ServerHello => ServerHello::encoded_len(),
            ContentType::ClientFailed => ClientFailed::encoded_len(),
            ContentType::ServerErase => ServerErase::encoded_len(),
            ContentType::Unknown(_) => return None,
        };
        Some(len)
    }

    pub fn parse(
        input: &[u8],
        content_type: ContentType,
        cipher_suite: CipherSuite,
    ) -> Result<(&[u8], Body), Error> {
        let (input, body) = match content_type {
            ContentType::ClientHello => {
                let (input, hello) = ClientHello::parse(input, cipher_suite)?;
                (input, Body::ClientHello(hello))
            }
            ContentType::ServerHello => {
                let (input, hello) = ServerHello::parse(input)?;
                (input, Body::ServerHello(hello))
            }
            ContentType::ClientFailed => {
                let (input, failed) = ClientFailed::parse(input)?;
                (input, Body::ClientFailed(failed))
            }
            ContentType::ServerErase => {
                let (input, erase) = ServerErase::parse(input)?;
                (input, Body::ServerErase(erase))
            }
            ContentType::Unknown(value) => return Err(Error::InvalidContentType(value)),
        };
        Ok((input, body))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        match self {
            Body::ClientHello(v) => v.serialize(output),
            Body::ServerHello(v) => v.serialize(output),
            Body::ClientFailed(v) => v.serialize(output),
            Body::ServerErase(v) => v.serialize(output),
        }
    }
}

/// A SimSSL handshake packet.
///
/// Immutable once built. `Length` and `CheckSum` are not stored; the codec
/// derives them when serializing and enforces them when parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    cipher_suite: CipherSuite,
    body: Body,
}

impl Packet {
    /// Create a packet.
    ///
    /// For a ClientHello the cipher suite is taken from its session key, so
    /// the key, the IV and the Mode byte can't disagree.
    pub fn new(cipher_suite: CipherSuite, body: Body) -> Self {
        let cipher_suite = match &body {
            Body::ClientHello(hello) => hello.session_key.cipher_suite(),
            _ => cipher_suite,
        };
        Packet { cipher_suite, body }
    }

    pub fn content_type(&self) -> ContentType {
        self.body.content_type()
    }

    pub fn version(&self) -> ProtocolVersion {
        ProtocolVersion::V1
    }

    pub fn cipher_suite(&self) -> CipherSuite {
        self.cipher_suite
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn client_id(&self) -> &Id {
        match &self.body {
            Body::ClientHello(v) => &v.client_id,
            Body::ServerHello(v) => &v.client_id,
            Body::ClientFailed(v) => &v.client_id,
            Body::ServerErase(v) => &v.client_id,
        }
    }

    pub fn server_id(&self) -> &Id {
        match &self.body {
            Body::ClientHello(v) => &v.server_id,
            Body::ServerHello(v) => &v.server_id,
            Body::ClientFailed(v) => &v.server_id,
            Body::ServerErase(v) => &v.server_id,
        }
    }

    pub fn as_client_hello(&self) -> Option<&ClientHello> {
        match &self.body {
            Body::ClientHello(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_server_hello(&self) -> Option<&ServerHello> {
        match &self.body {
            Body::ServerHello(v) => Some(v),
            _ => None,
        }
    }

    /// Total encoded size, the value of the `Length` field.
    pub fn length(&self) -> u16 {
        // unwrap() is ok, content_type() is never Unknown for a built body.
        let body_len = Body::encoded_len(self.content_type(), self.cipher_suite).unwrap();
        (HEADER_LEN + body_len) as u16
    }

    /// Header as it goes on the wire, with the checksum still zero.
    pub fn header(&self) -> Header {
        Header {
            content_type: self.content_type(),
            version: self.version(),
            length: self.length(),
            cipher_suite: self.cipher_suite,
            checksum: 0,
        }
    }

    /// Append the encoded packet to `output` and stamp its checksum.
    pub fn serialize(&self, output: &mut Vec<u8>) {
        let start = output.len();

        self.header().serialize(output);
        self.body.serialize(output);

        let packet = &mut output[start..];
        let sum = checksum::compute(packet, packet.len() as u16);
        packet[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&sum.to_be_bytes());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.length() as usize);
        self.serialize(&mut output);
        output
    }

    /// Decode one packet that spans all of `input`, verifying its checksum.
    pub fn parse(input: &[u8]) -> Result<Packet, Error> {
        Self::do_parse(input, true)
    }

    /// Decode one packet without checksum verification.
    ///
    /// For peers that leave the checksum field at zero. All other header
    /// checks still apply.
    pub fn parse_unchecked(input: &[u8]) -> Result<Packet, Error> {
        Self::do_parse(input, false)
    }

    fn do_parse(input: &[u8], verify_checksum: bool) -> Result<Packet, Error> {
        let (rest, header) = Header::parse(input)?;

        if let ContentType::Unknown(value) = header.content_type {
            return Err(Error::InvalidContentType(value));
        }

        if header.version != ProtocolVersion::V1 {
            return Err(Error::UnsupportedVersion(header.version.as_u8()));
        }

        let suite = header.cipher_suite;
        if !suite.is_supported() {
            return Err(Error::UnsupportedCipherSuite(
                suite.method().as_u8(),
                suite.mode().as_u8(),
            ));
        }

        let expected = Body::encoded_len(header.content_type, suite)
            .map(|len| HEADER_LEN + len)
            .unwrap_or(HEADER_LEN);

        if header.length as usize != input.len() {
            return Err(Error::LengthMismatch {
                declared: header.length,
                actual: input.len(),
            });
        }

        if header.length as usize != expected {
            return Err(Error::LengthMismatch {
                declared: header.length,
                actual: expected,
            });
        }

        if verify_checksum && !checksum::verify(input) {
            let sum = checksum::compute(input, header.length);
            debug!("Bad checksum on {} packet", header.content_type);
            return Err(Error::BadChecksum(sum));
        }

        let (rest, body) = Body::parse(rest, header.content_type, suite)?;
        debug_assert!(rest.is_empty());

        // A ClientHello body decides the suite through its key, which was
        // parsed according to the header, so the two agree.
        Ok(Packet {
            cipher_suite: suite,
            body,
        })
    }
}
