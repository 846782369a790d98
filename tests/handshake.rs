//! End to end handshake tests.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use simssl::crypto::{decrypt, encrypt, SessionKey};
use simssl::{build_client_hello, build_server_hello, check_key, seal_client_hello};
use simssl::{Body, Client, Config, ContentType, HandshakeState, Id, SeededRng, Server};

fn now() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

fn seeded_config(seed: u64) -> Arc<Config> {
    Arc::new(Config::builder().rng_seed(Some(seed)).build().unwrap())
}

#[test]
fn client_hello_identity_and_expiration() {
    let _ = env_logger::try_init();

    let config = Config::default();
    let mut rng = SeededRng::new(None);

    let packet = build_client_hello(b"device-42", &config, &mut rng, now()).unwrap();
    let hello = packet.as_client_hello().unwrap();

    assert_eq!(
        hello.client_id.to_string(),
        "03eb6abfefd46cd099f54e630936fb95d0148182475cac947533270eeb111269"
    );
    assert_eq!(hello.server_id, Id::digest(b"unknown"));
    assert_eq!(hello.expiration_time, 1_700_000_000 + 86400);

    let other = build_client_hello(b"anything", &config, &mut rng, now()).unwrap();
    assert_eq!(other.server_id(), &Id::unknown());
}

#[test]
fn known_key_and_nonce_validate() {
    let _ = env_logger::try_init();

    let key = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
        0xFF,
    ];
    let nonce: [u8; 32] = std::array::from_fn(|i| (i as u8).wrapping_mul(29).wrapping_add(101));

    let client = seal_client_hello(
        b"dev-1",
        &nonce,
        SessionKey::new(&key).unwrap(),
        1_700_086_400,
    )
    .unwrap();
    let hello = client.as_client_hello().unwrap();

    // RandomInit is the first 32 bytes of the padded ciphertext.
    let ciphertext = encrypt(&nonce, &key).unwrap();
    assert_eq!(&hello.random_init[..], &ciphertext[..32]);
    assert_eq!(decrypt(&ciphertext, &key).unwrap(), nonce);

    let server = build_server_hello(
        hello.client_id,
        b"server-a",
        &hello.random_init,
        &key,
        hello.expiration_time,
    )
    .unwrap();

    assert_eq!(server.as_server_hello().unwrap().random_init, nonce);
    assert!(check_key(&client, &server));
}

#[test]
fn flipped_random_init_fails() {
    let _ = env_logger::try_init();

    let config = Config::default();
    let mut rng = SeededRng::new(Some(17));

    let client = build_client_hello(b"dev-1", &config, &mut rng, now()).unwrap();
    let hello = client.as_client_hello().unwrap();
    let server = build_server_hello(
        hello.client_id,
        b"server-a",
        &hello.random_init,
        hello.session_key.key(),
        hello.expiration_time,
    )
    .unwrap();
    assert!(check_key(&client, &server));

    let Body::ServerHello(mut tampered) = server.into_body() else {
        panic!("expected ServerHello");
    };
    tampered.random_init[7] ^= 0x40;
    let tampered = simssl::Packet::new(client.cipher_suite(), Body::ServerHello(tampered));

    assert!(!check_key(&client, &tampered));
}

#[test]
fn nonce_ending_in_padding_bytes_validates() {
    let _ = env_logger::try_init();

    let server = Server::new(seeded_config(2), b"server-a");

    for tail in [&[0x01][..], &[0x02, 0x02], &[0x03, 0x03, 0x03]] {
        let mut nonce = [0x77u8; 32];
        nonce[32 - tail.len()..].copy_from_slice(tail);

        let client = seal_client_hello(
            b"dev-1",
            &nonce,
            SessionKey::new(&[0x33; 16]).unwrap(),
            1_700_086_400,
        )
        .unwrap();

        let answer = server
            .handle_bytes(&client.to_bytes(), now())
            .unwrap()
            .unwrap();

        // The server sends the full plaintext nonce back.
        assert_eq!(answer.as_server_hello().unwrap().random_init, nonce);
        assert!(check_key(&client, &answer));
    }
}

#[test]
fn canonical_success_path() {
    let _ = env_logger::try_init();

    let mut client = Client::new(seeded_config(1), b"dev-1");
    let server = Server::new(seeded_config(2), b"server-a");
    assert_eq!(client.state(), HandshakeState::Idle);

    let hello = client.start(now()).unwrap();
    assert_eq!(client.state(), HandshakeState::ClientHelloSent);

    let answer = server
        .handle_bytes(&hello.to_bytes(), now())
        .unwrap()
        .expect("server answers a ClientHello");
    assert_eq!(answer.content_type(), ContentType::ServerHello);

    let reply = client.handle_bytes(&answer.to_bytes(), now()).unwrap();
    assert!(reply.is_none());
    assert_eq!(client.state(), HandshakeState::Validated);
    assert_eq!(client.server_id(), Some(server.server_id()));
    assert_eq!(
        client.session_key().unwrap().key(),
        hello.as_client_hello().unwrap().session_key.key()
    );
}

#[test]
fn substituted_nonce_fails_and_erases() {
    let _ = env_logger::try_init();

    let mut client = Client::new(seeded_config(1), b"dev-1");
    let server = Server::new(seeded_config(2), b"server-a");

    let hello = client.start(now()).unwrap();
    let hello = hello.as_client_hello().unwrap();

    // A different nonce, sealed with the same key, reaches the server.
    let substitute = seal_client_hello(
        b"dev-1",
        &[0x5A; 32],
        hello.session_key.clone(),
        hello.expiration_time,
    )
    .unwrap();

    let answer = server.handle_packet(&substitute, now()).unwrap().unwrap();
    let failed = client
        .handle_packet(&answer, now())
        .unwrap()
        .expect("client sends ClientFailed");

    assert_eq!(client.state(), HandshakeState::Failed);
    assert_eq!(failed.content_type(), ContentType::ClientFailed);
    assert_eq!(failed.client_id(), client.client_id());
    assert_eq!(failed.server_id(), server.server_id());

    let erase = server
        .handle_bytes(&failed.to_bytes(), now())
        .unwrap()
        .expect("server erases");
    assert_eq!(erase.content_type(), ContentType::ServerErase);

    client.handle_bytes(&erase.to_bytes(), now()).unwrap();
    assert_eq!(client.state(), HandshakeState::Erased);

    // A new attempt starts from Idle with a fresh nonce and key.
    client.restart();
    let retry = client.start(now()).unwrap();
    let retry_hello = retry.as_client_hello().unwrap();
    assert_ne!(retry_hello.random_init, hello.random_init);
    assert_ne!(retry_hello.session_key, hello.session_key);

    let answer = server.handle_bytes(&retry.to_bytes(), now()).unwrap().unwrap();
    client.handle_packet(&answer, now()).unwrap();
    assert_eq!(client.state(), HandshakeState::Validated);
}

#[test]
fn explicit_iv_suite_end_to_end() {
    let _ = env_logger::try_init();

    let config = Arc::new(
        Config::builder()
            .cipher_suite(simssl::CipherSuite::Aes128CbcExplicitIv)
            .rng_seed(Some(9))
            .build()
            .unwrap(),
    );
    let mut client = Client::new(config.clone(), b"dev-1");
    let server = Server::new(config, b"server-a");

    let hello = client.start(now()).unwrap();
    let bytes = hello.to_bytes();
    assert_eq!(bytes.len(), 144);
    assert_eq!(bytes[5], 0x06);

    let answer = server.handle_bytes(&bytes, now()).unwrap().unwrap();
    assert!(client.handle_bytes(&answer.to_bytes(), now()).unwrap().is_none());
    assert_eq!(client.state(), HandshakeState::Validated);
}

#[test]
fn stale_client_hello_is_erased() {
    let _ = env_logger::try_init();

    let mut client = Client::new(seeded_config(1), b"dev-1");
    let server = Server::new(seeded_config(2), b"server-a");

    let hello = client.start(now()).unwrap();
    let much_later = now() + Duration::from_secs(2 * 86400);

    let erase = server.handle_packet(&hello, much_later).unwrap().unwrap();
    assert_eq!(erase.content_type(), ContentType::ServerErase);

    client.handle_packet(&erase, much_later).unwrap();
    assert_eq!(client.state(), HandshakeState::Erased);
}

#[test]
fn handshakes_in_parallel() {
    let _ = env_logger::try_init();

    let server = Arc::new(Server::new(Arc::new(Config::default()), b"server-a"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let server = Arc::clone(&server);
            std::thread::spawn(move || {
                let identity = format!("dev-{}", i);
                let mut client = Client::new(Arc::new(Config::default()), identity.as_bytes());
                let now = SystemTime::now();

                let hello = client.start(now).unwrap();
                let answer = server.handle_bytes(&hello.to_bytes(), now).unwrap().unwrap();
                client.handle_bytes(&answer.to_bytes(), now).unwrap();
                client.state()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), HandshakeState::Validated);
    }
}
