use crate::Generator;
use data_encoding::BASE32_NOPAD;
use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::error;

/// Draws tokens from the operating system's CSPRNG.
///
/// `length` random bytes are base32 encoded (RFC 4648 alphabet, no padding)
/// and truncated to `length` characters, so every output is uppercase
/// `A-Z2-7`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self, length: usize) -> String {
        let mut buffer = vec![0_u8; length];

        // No fallback source: a token that is not from the OS CSPRNG must
        // never be handed out.
        if let Err(err) = OsRng.try_fill_bytes(&mut buffer) {
            error!(error = %err, "secure random source failed, aborting");
            std::process::abort();
        }

        let mut encoded = BASE32_NOPAD.encode(&buffer);
        encoded.truncate(length);
        encoded
    }
}
