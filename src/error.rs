use thiserror::Error;

/// Errors produced by the SimSSL codec, crypto and handshake drivers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid AES-128 key length {0}, expected 16")]
    CryptoKeyError(usize),

    #[error("Invalid CBC IV length {0}, expected 16")]
    InvalidIvLength(usize),

    #[error("Ciphertext length {0} is not a multiple of the block size")]
    CiphertextLength(usize),

    #[error("Parse incomplete")]
    ParseIncomplete,

    #[error("Parse error: {0:?}")]
    ParseError(nom::error::ErrorKind),

    #[error("Invalid content type {0}")]
    InvalidContentType(u8),

    #[error("Unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    #[error("Unsupported cipher suite (method {0}, mode {1})")]
    UnsupportedCipherSuite(u8, u8),

    #[error("Length field {declared} does not match encoded size {actual}")]
    LengthMismatch { declared: u16, actual: usize },

    #[error("Bad checksum, verification sum {0:#06x}")]
    BadChecksum(u16),

    #[error("Unexpected message: {0}")]
    UnexpectedMessage(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(value: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match value {
            nom::Err::Incomplete(_) => Error::ParseIncomplete,
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::ParseError(e.code),
        }
    }
}
