//! Deterministic bundle of session RNG streams segregated by domain.
//!
//! Chunk decisions never touch these streams; they are a pure function of
//! the chunk index (see [`crate::chunkgen`]). The bundle covers the
//! session-scoped draws: weather windows and ambient effect jitter.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Domain-separated RNG streams for one simulation session.
#[derive(Debug, Clone)]
pub struct RngBundle {
    weather: RefCell<ChaCha20Rng>,
    ambient: RefCell<ChaCha20Rng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let weather = ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"weather"));
        let ambient = ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"ambient"));
        Self {
            weather: RefCell::new(weather),
            ambient: RefCell::new(ambient),
        }
    }

    /// Access the weather RNG stream.
    #[must_use]
    pub fn weather(&self) -> RefMut<'_, ChaCha20Rng> {
        self.weather.borrow_mut()
    }

    /// Access the ambient-effects RNG stream.
    #[must_use]
    pub fn ambient(&self) -> RefMut<'_, ChaCha20Rng> {
        self.ambient.borrow_mut()
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
