//! Scheme parameters.
//!
//! Everything is derived from the encoded database's column count `m`;
//! the remaining values are the fixed LWE parameterization the protocol
//! was deployed with. Clients receive all of these during the handshake
//! and must use the same set for the life of a session.

use crate::error::PirError;
use crate::matrix::Matrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// LWE secret dimension `n`.
pub const LWE_DIMENSION: usize = 1024;
/// Ciphertext modulus `q`.
pub const MODULUS: u64 = 1 << 32;
/// Plaintext modulus `p`. Encoded database entries must stay below this.
pub const PLAINTEXT_MODULUS: u64 = 991;
/// Standard deviation of the client-side discrete Gaussian noise.
pub const NOISE_STD_DEV: f64 = 6.4;
/// Seed length for deterministic parameter generation.
pub const SEED_BYTE_LEN: usize = 32;

/// Parameters for one generation of the encoded database.
///
/// `a` is the public n x m LWE matrix; it is regenerated together with
/// the rest of the set whenever the database is re-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PirParams {
    pub n: usize,
    pub m: usize,
    pub q: u64,
    pub p: u64,
    pub std_dev: f64,
    pub a: Matrix,
}

/// Generates a fresh parameter set for a database with `m` columns.
pub fn gen_params(m: usize) -> Result<PirParams, PirError> {
    let mut rng = ChaCha8Rng::from_os_rng();
    gen_params_with_rng(m, &mut rng)
}

/// Deterministic variant of [`gen_params`] for reproducible setups.
pub fn gen_params_from_seed(m: usize, seed: [u8; SEED_BYTE_LEN]) -> Result<PirParams, PirError> {
    let mut rng = ChaCha8Rng::from_seed(seed);
    gen_params_with_rng(m, &mut rng)
}

fn gen_params_with_rng<R: rand::Rng>(m: usize, rng: &mut R) -> Result<PirParams, PirError> {
    let a = Matrix::random(LWE_DIMENSION, m, MODULUS, rng)?;
    Ok(PirParams {
        n: LWE_DIMENSION,
        m,
        q: MODULUS,
        p: PLAINTEXT_MODULUS,
        std_dev: NOISE_STD_DEV,
        a,
    })
}
