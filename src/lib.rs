//! SimSSL is a small handshake protocol that sets up a symmetric session
//! between an IoT client and a server.
//!
//! The client sends a ClientHello carrying its hashed identity, a fresh
//! AES-128 session key and a nonce encrypted with that key. The server
//! decrypts the nonce and sends it back in a ServerHello. If the nonce, the
//! client ID and the expiration time all match, the client admits the
//! session. Otherwise it sends ClientFailed, and the server answers with
//! ServerErase.
//!
//! The crate is Sans-IO: it builds, encodes and checks packets, and leaves
//! moving bytes to the caller. Randomness and time are passed in.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::SystemTime;
//!
//! use simssl::{Client, Config, HandshakeState, Server};
//!
//! let config = Arc::new(Config::default());
//! let mut client = Client::new(config.clone(), b"dev-1");
//! let server = Server::new(config, b"server-a");
//!
//! let now = SystemTime::now();
//!
//! let hello = client.start(now).unwrap().to_bytes();
//! let answer = server.handle_bytes(&hello, now).unwrap().unwrap().to_bytes();
//! let reply = client.handle_bytes(&answer, now).unwrap();
//!
//! assert!(reply.is_none());
//! assert_eq!(client.state(), HandshakeState::Validated);
//! ```
//!
//! # Wire format
//!
//! All integers are big-endian. Every packet starts with an 8 byte header:
//!
//! ```text
//! ContentType(1) Version(1) Length(2) Method(1) Mode(1) CheckSum(2)
//! ```
//!
//! followed by ClientID(32) and ServerID(32). ClientHello and ServerHello add
//! ExpirationTime(8) and RandomInit(32). ClientHello adds EncryptKey(16), and
//! an IV(16) for [`CipherSuite::Aes128CbcExplicitIv`].

#![forbid(unsafe_code)]
#![warn(clippy::all)]

#[macro_use]
extern crate log;

mod error;
pub use error::Error;

pub mod checksum;
pub mod crypto;
pub mod message;
pub mod types;

mod builder;
pub use builder::{build_client_failed, build_client_hello, build_server_erase};
pub use builder::{build_server_hello, build_server_hello_for, seal_client_hello};

mod validator;
pub use validator::{check_hello, check_key, is_expired};

mod config;
pub use config::{Config, ConfigBuilder};

mod rng;
pub use rng::SeededRng;

mod state;
pub use state::HandshakeState;

mod client;
pub use client::Client;

mod server;
pub use server::Server;

mod time_tricks;
pub use time_tricks::SystemTimeExt;

pub use message::{Body, Id, Packet};
pub use types::{CipherSuite, ContentType};
