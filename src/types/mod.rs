//! Header-level enums of the SimSSL wire format.

mod cipher_suite;
pub use cipher_suite::{CipherSuite, Method, Mode};

mod ctype;
pub use ctype::ContentType;

mod version;
pub use version::ProtocolVersion;
