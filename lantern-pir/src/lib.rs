//! Lantern PIR - LWE-based private information retrieval primitives
//!
//! This crate implements the algebra behind Lantern's retrieval protocol:
//! a database encoded as a matrix of small values, a public LWE matrix
//! shared with clients, a precomputed hint that lets clients strip the
//! noise from answers, and the answer computation itself.
//!
//! The server never interprets a query. It multiplies the opaque query
//! vector against the encoded database modulo `q` and returns the result;
//! which column the client actually asked for stays hidden inside the
//! LWE encryption.

mod error;
mod matrix;
mod params;
mod scheme;

pub use error::PirError;
pub use matrix::Matrix;
pub use params::{
    gen_params, gen_params_from_seed, PirParams, LWE_DIMENSION, MODULUS, NOISE_STD_DEV,
    PLAINTEXT_MODULUS, SEED_BYTE_LEN,
};
pub use scheme::{answer, gen_hint};
