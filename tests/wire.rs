//! Byte level properties of encoded packets.

use simssl::checksum;
use simssl::crypto::{decrypt, encrypt, SessionKey};
use simssl::message::{CHECKSUM_OFFSET, HEADER_LEN};
use simssl::{build_client_failed, build_server_erase, seal_client_hello};
use simssl::{Body, CipherSuite, ContentType, Error, Id, Packet};

const KEY: [u8; 16] = *b"0123456789abcdef";

fn client_hello() -> Packet {
    seal_client_hello(
        b"dev-1",
        &[0xA5; 32],
        SessionKey::new(&KEY).unwrap(),
        1_700_086_400,
    )
    .unwrap()
}

#[test]
fn client_hello_layout() {
    let _ = env_logger::try_init();

    let bytes = client_hello().to_bytes();
    assert_eq!(bytes.len(), 128);

    assert_eq!(bytes[0], 0x01);
    assert_eq!(bytes[1], 0x01);
    assert_eq!(&bytes[2..4], &[0x00, 0x80]);
    assert_eq!(&bytes[4..6], &[0x01, 0x02]);

    assert_eq!(&bytes[8..40], Id::digest(b"dev-1").as_bytes());
    assert_eq!(&bytes[40..72], Id::unknown().as_bytes());
    assert_eq!(&bytes[72..80], &1_700_086_400i64.to_be_bytes());
    assert_eq!(&bytes[112..128], &KEY);
}

#[test]
fn every_kind_has_its_length() {
    let _ = env_logger::try_init();

    let hello = client_hello();
    let server_hello =
        simssl::build_server_hello_for(hello.as_client_hello().unwrap(), b"srv").unwrap();
    let failed = build_client_failed(b"dev-1", b"srv");
    let erase = build_server_erase(Id::digest(b"dev-1"), b"srv");

    for (packet, ctype, len) in [
        (&hello, ContentType::ClientHello, 128),
        (&server_hello, ContentType::ServerHello, 112),
        (&failed, ContentType::ClientFailed, 72),
        (&erase, ContentType::ServerErase, 72),
    ] {
        let bytes = packet.to_bytes();
        assert_eq!(packet.content_type(), ctype);
        assert_eq!(bytes.len(), len);
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]) as usize, len);
        assert_eq!(Packet::parse(&bytes).unwrap(), *packet);
    }
}

#[test]
fn checksum_verifies_to_zero() {
    let _ = env_logger::try_init();

    let bytes = client_hello().to_bytes();
    assert!(checksum::verify(&bytes));
    assert_eq!(checksum::compute(&bytes, bytes.len() as u16), 0);

    let mut zeroed = bytes.clone();
    zeroed[CHECKSUM_OFFSET] = 0;
    zeroed[CHECKSUM_OFFSET + 1] = 0;
    let expected = checksum::compute(&zeroed, zeroed.len() as u16);
    assert_eq!(
        u16::from_be_bytes([bytes[CHECKSUM_OFFSET], bytes[CHECKSUM_OFFSET + 1]]),
        expected
    );
}

#[test]
fn corruption_is_detected() {
    let _ = env_logger::try_init();

    let mut bytes = client_hello().to_bytes();
    bytes[HEADER_LEN + 3] ^= 0x01;

    assert!(matches!(Packet::parse(&bytes), Err(Error::BadChecksum(_))));
    // The unchecked parser still accepts the body.
    assert!(Packet::parse_unchecked(&bytes).is_ok());
}

#[test]
fn truncated_packet_is_rejected() {
    let _ = env_logger::try_init();

    let bytes = client_hello().to_bytes();
    assert!(Packet::parse(&bytes[..HEADER_LEN - 1]).is_err());
    assert!(Packet::parse(&bytes[..100]).is_err());
}

#[test]
fn aligned_plaintext_gets_full_padding_block() {
    let plaintext = [0x42u8; 32];
    let ciphertext = encrypt(&plaintext, &KEY).unwrap();
    assert_eq!(ciphertext.len(), 48);

    // CBC is prefix stable, so the final block must be sixteen 0x10 bytes.
    let mut explicit = plaintext.to_vec();
    explicit.extend_from_slice(&[0x10; 16]);
    let longer = encrypt(&explicit, &KEY).unwrap();
    assert_eq!(&longer[..48], &ciphertext[..]);

    assert_eq!(decrypt(&ciphertext, &KEY).unwrap(), plaintext);
}

#[test]
fn encrypt_then_decrypt() {
    for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100] {
        let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let ciphertext = encrypt(&plaintext, &KEY).unwrap();
        assert_eq!(ciphertext.len() % 16, 0);
        assert!(ciphertext.len() > plaintext.len());
        assert_eq!(decrypt(&ciphertext, &KEY).unwrap(), plaintext);
    }
}

#[test]
fn short_key_is_rejected() {
    assert_eq!(encrypt(b"x", &KEY[..15]), Err(Error::CryptoKeyError(15)));
    assert_eq!(decrypt(&[0; 16], &[0; 17]), Err(Error::CryptoKeyError(17)));
}

#[test]
fn unsupported_suite_is_rejected() {
    let mut bytes = build_client_failed(b"dev-1", b"srv").to_bytes();
    bytes[5] = 0x03;

    assert!(matches!(
        Packet::parse_unchecked(&bytes),
        Err(Error::UnsupportedCipherSuite(0x01, 0x03))
    ));
}

#[test]
fn explicit_iv_hello_carries_iv() {
    let key = SessionKey::with_iv(&KEY, &[0x11; 16]).unwrap();
    assert_eq!(key.cipher_suite(), CipherSuite::Aes128CbcExplicitIv);

    let packet = seal_client_hello(b"dev-1", &[0xA5; 32], key, 0).unwrap();
    let bytes = packet.to_bytes();
    assert_eq!(bytes.len(), 144);
    assert_eq!(&bytes[128..144], &[0x11; 16]);

    let parsed = Packet::parse(&bytes).unwrap();
    let Body::ClientHello(hello) = parsed.body() else {
        panic!("expected ClientHello");
    };
    assert_eq!(hello.session_key.explicit_iv(), Some(&[0x11; 16]));
}
