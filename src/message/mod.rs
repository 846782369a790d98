//! SimSSL packets and their wire codec.

mod client_failed;
mod client_hello;
mod id;
mod packet;
mod server_erase;
mod server_hello;

pub use client_failed::ClientFailed;
pub use client_hello::ClientHello;
pub use id::{Id, UNKNOWN_IDENTITY};
pub use packet::{Body, Header, Packet, CHECKSUM_OFFSET, HEADER_LEN};
pub use server_erase::ServerErase;
pub use server_hello::ServerHello;
