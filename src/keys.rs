//! Node key material.
//!
//! The node registry (an external collaborator) owns the authoritative list
//! of participating nodes; this crate consumes it as read-only
//! [`NodeRecord`]s and only ever handles the local node's own secret key.

use ark_ec::CurveGroup;
use ark_secp256k1::{Affine, Fr};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use ark_std::UniformRand;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::params::CurveParams;

/// A node's private scalar key with `public_key = sk * G`. Zeroized on drop
/// and redacted from debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    sk: Fr,
}

impl SecretKey {
    /// Draws a fresh secret key from `rng` (which must be cryptographically
    /// secure).
    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        SecretKey { sk: Fr::rand(rng) }
    }

    pub fn from_scalar(sk: Fr) -> Self {
        SecretKey { sk }
    }

    /// The matching public key `sk * G`.
    pub fn public_key(&self, params: &CurveParams) -> Affine {
        (params.g * self.sk).into_affine()
    }

    /// Exposes the raw scalar. The caller must not let it outlive the
    /// operation that needs it.
    pub fn expose(&self) -> &Fr {
        &self.sk
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// A participating node as published by the registry: a dense 1-based index
/// and the node's public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct NodeRecord {
    pub index: u32,
    pub public_key: Affine,
}
