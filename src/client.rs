// SimSSL Client Handshake Flow:
//
// 1. Client sends ClientHello: hashed identity, encrypted nonce and the key
// 2. Server sends ServerHello: echoed ClientID/ExpirationTime, plaintext nonce
// 3. Client compares the nonce with its own
//    - match: session is validated
//    - mismatch or malformed answer: client sends ClientFailed
// 4. Server may send ServerErase any time before the session is validated
//
// This implementation is Sans-IO. The caller moves the packets.

use std::sync::Arc;
use std::time::SystemTime;

use crate::builder::build_client_hello;
use crate::crypto::SessionKey;
use crate::message::{Body, ClientFailed, Id, Packet};
use crate::rng::SeededRng;
use crate::state::HandshakeState;
use crate::validator::{check_key, is_expired};
use crate::{Config, Error};

/// Client side of a SimSSL handshake.
pub struct Client {
    config: Arc<Config>,

    /// Current handshake state.
    state: HandshakeState,

    client_identity: Vec<u8>,

    client_id: Id,

    rng: SeededRng,

    /// The ClientHello of the current attempt. Kept to validate the answer.
    client_hello: Option<Packet>,

    /// ServerID learned from the ServerHello.
    server_id: Option<Id>,
}

impl Client {
    pub fn new(config: Arc<Config>, client_identity: &[u8]) -> Client {
        let rng = SeededRng::new(config.rng_seed());
        Client {
            config,
            state: HandshakeState::Idle,
            client_identity: client_identity.to_vec(),
            client_id: Id::digest(client_identity),
            rng,
            client_hello: None,
            server_id: None,
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    pub fn client_id(&self) -> &Id {
        &self.client_id
    }

    pub fn client_identity(&self) -> &[u8] {
        &self.client_identity
    }

    /// ServerID of the peer, once a ServerHello arrived.
    pub fn server_id(&self) -> Option<&Id> {
        self.server_id.as_ref()
    }

    /// The agreed session key. Only available once validated.
    pub fn session_key(&self) -> Option<&SessionKey> {
        if self.state != HandshakeState::Validated {
            return None;
        }
        self.client_hello
            .as_ref()
            .and_then(|p| p.as_client_hello())
            .map(|h| &h.session_key)
    }

    /// Expiration of the current attempt.
    pub fn expiration_time(&self) -> Option<i64> {
        self.client_hello
            .as_ref()
            .and_then(|p| p.as_client_hello())
            .map(|h| h.expiration_time)
    }

    /// Start a handshake. Returns the ClientHello to send.
    pub fn start(&mut self, now: SystemTime) -> Result<Packet, Error> {
        if self.state != HandshakeState::Idle {
            return Err(Error::UnexpectedMessage(format!(
                "start in state {}",
                self.state
            )));
        }

        let packet = build_client_hello(&self.client_identity, &self.config, &mut self.rng, now)?;
        self.client_hello = Some(packet.clone());
        self.transition(HandshakeState::ClientHelloSent);

        Ok(packet)
    }

    /// Abandon the current attempt and go back to `Idle`.
    pub fn restart(&mut self) {
        self.client_hello = None;
        self.server_id = None;
        self.transition(HandshakeState::Idle);
    }

    /// Handle encoded bytes from the transport.
    ///
    /// While waiting for a ServerHello, bytes that don't decode fail the
    /// handshake and produce a ClientFailed.
    pub fn handle_bytes(
        &mut self,
        bytes: &[u8],
        now: SystemTime,
    ) -> Result<Option<Packet>, Error> {
        let parsed = if self.config.verify_checksum() {
            Packet::parse(bytes)
        } else {
            Packet::parse_unchecked(bytes)
        };

        match parsed {
            Ok(packet) => self.handle_packet(&packet, now),
            Err(e) if self.state == HandshakeState::ClientHelloSent => {
                debug!("Malformed answer to ClientHello: {}", e);
                Ok(Some(self.fail(Id::unknown())))
            }
            Err(e) => Err(e),
        }
    }

    /// Handle a decoded packet. Returns a packet to send back, if any.
    pub fn handle_packet(
        &mut self,
        packet: &Packet,
        now: SystemTime,
    ) -> Result<Option<Packet>, Error> {
        match (self.state, packet.body()) {
            (HandshakeState::ClientHelloSent, Body::ServerHello(server_hello)) => {
                self.server_id = Some(server_hello.server_id);
                self.transition(HandshakeState::ServerHelloReceived);

                // unwrap() is ok, ClientHelloSent always has a hello.
                let client_hello = self.client_hello.as_ref().unwrap();

                if !check_key(client_hello, packet) {
                    return Ok(Some(self.fail(server_hello.server_id)));
                }

                if is_expired(server_hello.expiration_time, now) {
                    debug!("ServerHello arrived after expiration");
                    return Ok(Some(self.fail(server_hello.server_id)));
                }

                self.transition(HandshakeState::Validated);
                Ok(None)
            }

            (
                HandshakeState::ClientHelloSent
                | HandshakeState::ServerHelloReceived
                | HandshakeState::Failed,
                Body::ServerErase(erase),
            ) if erase.client_id == self.client_id =>
            {
                self.transition(HandshakeState::Erased);
                Ok(None)
            }

            (state, _) => Err(Error::UnexpectedMessage(format!(
                "{} in state {}",
                packet.content_type(),
                state
            ))),
        }
    }

    fn fail(&mut self, server_id: Id) -> Packet {
        self.transition(HandshakeState::Failed);
        let failed = ClientFailed::new(self.client_id, server_id);
        Packet::new(self.config.cipher_suite(), Body::ClientFailed(failed))
    }

    fn transition(&mut self, new_state: HandshakeState) {
        let prev_state = self.state;
        if prev_state != new_state {
            self.state = new_state;
            trace!("{:?} -> {:?}", prev_state, new_state);
        }
    }
}
