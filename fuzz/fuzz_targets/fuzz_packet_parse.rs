#![no_main]

//! Fuzz target for SimSSL packet parsing.
//!
//! Raw input is parsed as is. Inputs long enough to carry a header are also
//! reframed with a correct length and checksum, so the body parsers and the
//! client/server drivers see data that gets past the header checks.
//!
//! Packet header:
//! - ContentType: 1 byte (1-4 valid values)
//! - Version: 1 byte (1)
//! - Length: 2 bytes
//! - CipherSuite: 2 bytes (method 1, mode 2 or 6)
//! - Checksum: 2 bytes

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use std::time::SystemTime;

use simssl::checksum;
use simssl::message::{CHECKSUM_OFFSET, HEADER_LEN};
use simssl::{Client, Config, Packet, Server};

/// Largest packet, a ClientHello with explicit IV.
const MAX_PACKET_LEN: usize = 144;

fuzz_target!(|data: &[u8]| {
    let _ = Packet::parse(data);
    let _ = Packet::parse_unchecked(data);

    if data.len() < HEADER_LEN {
        return;
    }

    let len = data.len().min(MAX_PACKET_LEN);
    let mut framed = data[..len].to_vec();
    framed[2..4].copy_from_slice(&(len as u16).to_be_bytes());
    framed[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].fill(0);
    let sum = checksum::compute(&framed, len as u16);
    framed[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&sum.to_be_bytes());

    if let Ok(packet) = Packet::parse(&framed) {
        // A parsed packet must encode back to the same bytes.
        assert_eq!(packet.to_bytes(), framed);
    }

    let config = Arc::new(Config::default());
    let now = SystemTime::now();

    let server = Server::new(Arc::clone(&config), b"fuzz-server");
    let _ = server.handle_bytes(&framed, now);

    let mut client = Client::new(config, b"fuzz-client");
    if client.start(now).is_ok() {
        let _ = client.handle_bytes(&framed, now);
    }
});
