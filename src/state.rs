use std::fmt;

/// Progress of one handshake attempt.
///
/// ```text
/// Idle -> ClientHelloSent -> ServerHelloReceived -> Validated
///                                                \-> Failed
/// ClientHelloSent | ServerHelloReceived | Failed -> Erased
/// ```
///
/// `Validated`, `Failed` and `Erased` end the attempt. A new attempt starts
/// over at `Idle` with a fresh nonce and key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Idle,
    ClientHelloSent,
    ServerHelloReceived,
    Validated,
    Failed,
    Erased,
}

impl HandshakeState {
    pub fn name(&self) -> &'static str {
        match self {
            HandshakeState::Idle => "Idle",
            HandshakeState::ClientHelloSent => "ClientHelloSent",
            HandshakeState::ServerHelloReceived => "ServerHelloReceived",
            HandshakeState::Validated => "Validated",
            HandshakeState::Failed => "Failed",
            HandshakeState::Erased => "Erased",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            HandshakeState::Validated | HandshakeState::Failed | HandshakeState::Erased
        )
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
