use std::time::Duration;

use crate::types::CipherSuite;
use crate::Error;

/// SimSSL configuration
#[derive(Debug, Clone)]
pub struct Config {
    expiration_lifetime: Duration,
    cipher_suite: CipherSuite,
    rng_seed: Option<u64>,
    verify_checksum: bool,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            expiration_lifetime: Duration::from_secs(60 * 60 * 24),
            cipher_suite: CipherSuite::Aes128Cbc,
            rng_seed: None,
            verify_checksum: true,
        }
    }

    /// How long a session stays valid after the ClientHello.
    ///
    /// Added to the current time to form the ExpirationTime field.
    #[inline(always)]
    pub fn expiration_lifetime(&self) -> Duration {
        self.expiration_lifetime
    }

    /// Cipher suite used for new ClientHellos.
    #[inline(always)]
    pub fn cipher_suite(&self) -> CipherSuite {
        self.cipher_suite
    }

    /// Seed for nonce and key generation.
    ///
    /// `None` uses the OS random source.
    #[inline(always)]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Whether received packets must carry a valid checksum.
    #[inline(always)]
    pub fn verify_checksum(&self) -> bool {
        self.verify_checksum
    }
}

/// Builder for SimSSL configuration.
pub struct ConfigBuilder {
    expiration_lifetime: Duration,
    cipher_suite: CipherSuite,
    rng_seed: Option<u64>,
    verify_checksum: bool,
}

impl ConfigBuilder {
    /// Set how long a session stays valid after the ClientHello.
    ///
    /// Whole seconds only, sub-second parts are dropped.
    /// Defaults to 24 hours.
    pub fn expiration_lifetime(mut self, lifetime: Duration) -> Self {
        self.expiration_lifetime = lifetime;
        self
    }

    /// Set the cipher suite for new ClientHellos.
    ///
    /// Defaults to [`CipherSuite::Aes128Cbc`], which peers that predate
    /// explicit IVs understand.
    pub fn cipher_suite(mut self, cipher_suite: CipherSuite) -> Self {
        self.cipher_suite = cipher_suite;
        self
    }

    /// Seed nonce and key generation. For tests only.
    ///
    /// Defaults to `None`.
    pub fn rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Set whether received packets must carry a valid checksum.
    ///
    /// Turn off for peers that leave the field at zero.
    /// Defaults to true.
    pub fn verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    /// Build the configuration.
    ///
    /// Returns `Error::ConfigError` for an unsupported cipher suite or a
    /// lifetime below one second.
    pub fn build(self) -> Result<Config, Error> {
        if !self.cipher_suite.is_supported() {
            return Err(Error::ConfigError(format!(
                "Unsupported cipher suite: {}",
                self.cipher_suite
            )));
        }

        if self.expiration_lifetime.as_secs() == 0 {
            return Err(Error::ConfigError(
                "Expiration lifetime must be at least one second".to_string(),
            ));
        }

        if self.expiration_lifetime.as_secs() > i64::MAX as u64 {
            return Err(Error::ConfigError(
                "Expiration lifetime out of range".to_string(),
            ));
        }

        Ok(Config {
            expiration_lifetime: self.expiration_lifetime,
            cipher_suite: self.cipher_suite,
            rng_seed: self.rng_seed,
            verify_checksum: self.verify_checksum,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder()
            .build()
            .expect("Default config should always validate")
    }
}
