// SimSSL Server Handshake Flow:
//
// 1. Server receives ClientHello
//    - stale (ExpirationTime passed): answer with ServerErase
//    - otherwise decrypt the nonce with the carried key, answer ServerHello
// 2. Server receives ClientFailed addressed to it: answer with ServerErase
//
// The server keeps no per-client state. Serializing handshakes per device is
// left to the transport.

use std::sync::Arc;
use std::time::SystemTime;

use crate::builder::{build_server_erase, build_server_hello_for};
use crate::message::{Body, Id, Packet};
use crate::validator::is_expired;
use crate::{Config, Error};

/// Server side of a SimSSL handshake.
pub struct Server {
    config: Arc<Config>,
    server_identity: Vec<u8>,
    server_id: Id,
}

impl Server {
    pub fn new(config: Arc<Config>, server_identity: &[u8]) -> Server {
        Server {
            config,
            server_identity: server_identity.to_vec(),
            server_id: Id::digest(server_identity),
        }
    }

    pub fn server_id(&self) -> &Id {
        &self.server_id
    }

    /// Handle encoded bytes from the transport.
    pub fn handle_bytes(&self, bytes: &[u8], now: SystemTime) -> Result<Option<Packet>, Error> {
        let packet = if self.config.verify_checksum() {
            Packet::parse(bytes)?
        } else {
            Packet::parse_unchecked(bytes)?
        };
        self.handle_packet(&packet, now)
    }

    /// Handle a decoded packet. Returns the packet to send back, if any.
    pub fn handle_packet(&self, packet: &Packet, now: SystemTime) -> Result<Option<Packet>, Error> {
        match packet.body() {
            Body::ClientHello(hello) => {
                if !hello.server_id.is_unknown() && hello.server_id != self.server_id {
                    return Err(Error::UnexpectedMessage(format!(
                        "ClientHello for server {:?}",
                        hello.server_id
                    )));
                }

                if is_expired(hello.expiration_time, now) {
                    warn!(
                        "Stale ClientHello from {:?}, expired at {}",
                        hello.client_id, hello.expiration_time
                    );
                    let erase = build_server_erase(hello.client_id, &self.server_identity);
                    return Ok(Some(erase));
                }

                let answer = build_server_hello_for(hello, &self.server_identity)?;
                debug!("ServerHello for {:?}", hello.client_id);
                Ok(Some(answer))
            }

            Body::ClientFailed(failed) => {
                if failed.server_id != self.server_id {
                    return Err(Error::UnexpectedMessage(format!(
                        "ClientFailed for server {:?}",
                        failed.server_id
                    )));
                }

                debug!("ClientFailed from {:?}, erasing", failed.client_id);
                let erase = build_server_erase(failed.client_id, &self.server_identity);
                Ok(Some(erase))
            }

            Body::ServerHello(_) | Body::ServerErase(_) => Err(Error::UnexpectedMessage(format!(
                "{} sent to a server",
                packet.content_type()
            ))),
        }
    }
}
