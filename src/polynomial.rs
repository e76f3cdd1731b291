//! The Shamir secret-sharing polynomial over the scalar field.

use ark_secp256k1::Fr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use ark_std::{UniformRand, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::PvssError;

/// One node's plaintext share: the polynomial evaluated at the node's index.
/// Indices start at 1; index 0 is the secret itself and is never distributed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Share {
    pub index: u32,
    pub value: Fr,
}

/// A polynomial of degree `threshold - 1` whose constant term is the shared
/// secret. Coefficients are secret material and are zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharingPolynomial {
    coeffs: Vec<Fr>,
}

impl SharingPolynomial {
    /// Builds a sharing polynomial for `secret` with `threshold - 1` random
    /// coefficients drawn from `rng` (which must be cryptographically secure).
    ///
    /// # Errors
    /// `InvalidInput` if `threshold` is zero.
    pub fn random<R: RngCore>(
        secret: Fr,
        threshold: usize,
        rng: &mut R,
    ) -> Result<Self, PvssError> {
        if threshold == 0 {
            return Err(PvssError::InvalidInput(
                "threshold must be at least 1".to_string(),
            ));
        }
        let mut coeffs = Vec::with_capacity(threshold);
        coeffs.push(secret);
        for _ in 1..threshold {
            coeffs.push(Fr::rand(rng));
        }
        Ok(SharingPolynomial { coeffs })
    }

    /// Constructs a polynomial from explicit coefficients; `coeffs[0]` is the
    /// secret.
    pub fn from_coefficients(coeffs: Vec<Fr>) -> Result<Self, PvssError> {
        if coeffs.is_empty() {
            return Err(PvssError::InvalidInput(
                "polynomial needs at least one coefficient".to_string(),
            ));
        }
        Ok(SharingPolynomial { coeffs })
    }

    /// The minimum number of shares required for reconstruction.
    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    /// The shared secret, `coeffs[0]`.
    pub fn secret(&self) -> Fr {
        self.coeffs[0]
    }

    pub fn coefficients(&self) -> &[Fr] {
        &self.coeffs
    }

    /// Evaluates the polynomial at `index` by Horner's method, every step
    /// reduced modulo the group order.
    pub fn evaluate(&self, index: u32) -> Fr {
        let x = Fr::from(u64::from(index));
        let mut acc = Fr::zero();
        for coeff in self.coeffs.iter().rev() {
            acc = acc * x + coeff;
        }
        acc
    }

    /// Produces shares for node indices `1..=n`.
    pub fn generate_shares(&self, n: usize) -> Vec<Share> {
        (1..=n as u32)
            .map(|index| Share {
                index,
                value: self.evaluate(index),
            })
            .collect()
    }
}

// Coefficients never appear in logs.
impl std::fmt::Debug for SharingPolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharingPolynomial")
            .field("threshold", &self.coeffs.len())
            .field("coeffs", &"[REDACTED]")
            .finish()
    }
}
