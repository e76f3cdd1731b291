//! Fixed secp256k1 group parameters and the hash-to-curve mapping.
//!
//! The coordinate field `Fq` and the scalar field `Fr` are distinct types:
//! point coordinates reduce modulo the field prime, secrets/shares/proof
//! responses reduce modulo the group order, and mixing the two does not
//! typecheck.

use ark_ec::AffineRepr;
use ark_ff::{BigInt, BigInteger, Field, PrimeField};
use ark_secp256k1::{Affine, Fq};
use ark_std::One;
use tracing::debug;

use crate::encoding;
use crate::error::PvssError;
use crate::utils::keccak256;

/// Hard cap on the hash-to-curve search loop. Roughly half of all candidate
/// x-coordinates are quadratic residues, so 1000 attempts failing in practice
/// means the input was constructed adversarially.
pub const MAX_HASH_TO_POINT_ITERATIONS: usize = 1000;

/// Immutable group parameters, built once at process start and shared
/// read-only. `h` has an unknown discrete log relative to `g`, which the
/// Feldman binding argument requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    /// Primary generator
    pub g: Affine,
    /// Secondary generator, derived by hashing `g.x` to a curve point
    pub h: Affine,
}

impl CurveParams {
    /// Builds the secp256k1 parameter set. The secondary generator is derived
    /// deterministically from the 32-byte big-endian encoding of `g.x`, so
    /// every process arrives at the same `h`.
    pub fn secp256k1() -> Result<Self, PvssError> {
        let g = Affine::generator();
        let h = hash_to_point(&encoding::fq_to_bytes(g.x))?;
        debug!(
            h = %hex::encode(encoding::point_to_bytes(&h)),
            "derived secondary generator"
        );
        Ok(CurveParams { g, h })
    }
}

/// Maps arbitrary bytes to a point on `y^2 = x^3 + 7`.
///
/// The input is hashed with Keccak-256 and the digest reduced modulo the
/// field prime before the search starts, so behavior is well defined for any
/// digest width. Candidate roots use `beta^((p+1)/4)`, valid because the
/// secp256k1 field prime is congruent to 3 mod 4.
///
/// Deterministic: identical input always yields the identical point.
///
/// # Errors
/// `HashToPointExhausted` if no curve point is found within
/// [`MAX_HASH_TO_POINT_ITERATIONS`] attempts.
pub fn hash_to_point(data: &[u8]) -> Result<Affine, PvssError> {
    let digest = keccak256(data);
    let mut x = Fq::from_be_bytes_mod_order(&digest);
    let exp = sqrt_exponent();
    let b = Fq::from(7u64);

    for _ in 0..MAX_HASH_TO_POINT_ITERATIONS {
        let beta = x.square() * x + b;
        let y = beta.pow(exp);
        if y.square() == beta {
            return Ok(Affine::new_unchecked(x, y));
        }
        x += Fq::one();
    }
    Err(PvssError::HashToPointExhausted(MAX_HASH_TO_POINT_ITERATIONS))
}

/// `(p + 1) / 4` as a bigint exponent. `p + 1` cannot overflow four limbs.
fn sqrt_exponent() -> BigInt<4> {
    let mut exp = Fq::MODULUS;
    exp.add_with_carry(&BigInt::from(1u64));
    exp.div2();
    exp.div2();
    exp
}
