//! Non-interactive Chaum-Pedersen discrete-log-equality proofs.
//!
//! A proof convinces any verifier that the prover knows `x` with
//! `xG = x * G` and `xH = x * Y` for a given base point `Y`, without
//! revealing `x`. In the PVSS flow `Y` is a node public key and `xH` doubles
//! as the encrypted share, so the proof makes every encrypted share publicly
//! auditable.

use ark_ec::CurveGroup;
use ark_ff::PrimeField;
use ark_secp256k1::{Affine, Fr};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use ark_std::UniformRand;
use rayon::prelude::*;

use crate::encoding;
use crate::error::PvssError;
use crate::keys::NodeRecord;
use crate::params::CurveParams;
use crate::polynomial::Share;
use crate::utils::keccak256;

/// A self-contained proof `(c, r, vG, vH, xG, xH)`; verifiable without any
/// secret material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct DleqProof {
    /// Fiat-Shamir challenge
    pub c: Fr,
    /// Response `v - c * x`
    pub r: Fr,
    pub v_g: Affine,
    pub v_h: Affine,
    pub x_g: Affine,
    pub x_h: Affine,
}

/// `Keccak256(xG || xH || vG || vH)` over fixed-width big-endian coordinate
/// encodings, interpreted as a scalar.
fn challenge(x_g: &Affine, x_h: &Affine, v_g: &Affine, v_h: &Affine) -> Fr {
    let mut bytes = [0u8; 4 * encoding::POINT_BYTES];
    for (slot, point) in bytes
        .chunks_exact_mut(encoding::POINT_BYTES)
        .zip([x_g, x_h, v_g, v_h])
    {
        slot.copy_from_slice(&encoding::point_to_bytes(point));
    }
    Fr::from_be_bytes_mod_order(&keccak256(&bytes))
}

impl DleqProof {
    /// Proves knowledge of `secret` such that `x_g = secret * G` and
    /// `x_h = secret * base`. Draws a fresh uniform nonce from `rng`; nonce
    /// reuse across two proofs leaks the secret through the two linear
    /// response equations, so the nonce never leaves this call.
    pub fn prove<R: RngCore>(
        secret: Fr,
        base: Affine,
        params: &CurveParams,
        rng: &mut R,
    ) -> Self {
        Self::prove_with_nonce(secret, base, Fr::rand(rng), params)
    }

    fn prove_with_nonce(secret: Fr, base: Affine, nonce: Fr, params: &CurveParams) -> Self {
        let x_g = (params.g * secret).into_affine();
        let x_h = (base * secret).into_affine();
        let v_g = (params.g * nonce).into_affine();
        let v_h = (base * nonce).into_affine();
        let c = challenge(&x_g, &x_h, &v_g, &v_h);
        let r = nonce - c * secret;
        DleqProof {
            c,
            r,
            v_g,
            v_h,
            x_g,
            x_h,
        }
    }

    /// Verifies the proof against `base`: checks `r*G + c*xG == vG`,
    /// `r*Y + c*xH == vH`, and the recomputed challenge.
    ///
    /// # Errors
    /// `InvalidProof` naming the first check that failed.
    pub fn verify(&self, base: Affine, params: &CurveParams) -> Result<(), PvssError> {
        if (params.g * self.r + self.x_g * self.c).into_affine() != self.v_g {
            return Err(PvssError::InvalidProof(
                "response does not match the primary-base commitment".to_string(),
            ));
        }
        if (base * self.r + self.x_h * self.c).into_affine() != self.v_h {
            return Err(PvssError::InvalidProof(
                "response does not match the secondary-base commitment".to_string(),
            ));
        }
        if challenge(&self.x_g, &self.x_h, &self.v_g, &self.v_h) != self.c {
            return Err(PvssError::InvalidProof(
                "challenge does not match the transcript".to_string(),
            ));
        }
        Ok(())
    }
}

/// Produces one proof per (node, share) pair. Nonces are drawn sequentially
/// from the caller's CSPRNG; the scalar-multiplication-heavy proof
/// construction runs on the rayon pool, one task per pair.
///
/// # Errors
/// `InvalidInput` if the node and share lists differ in length.
pub fn batch_prove<R: RngCore>(
    nodes: &[NodeRecord],
    shares: &[Share],
    params: &CurveParams,
    rng: &mut R,
) -> Result<Vec<DleqProof>, PvssError> {
    if nodes.len() != shares.len() {
        return Err(PvssError::InvalidInput(format!(
            "node list length ({}) must equal share list length ({})",
            nodes.len(),
            shares.len()
        )));
    }

    let nonces: Vec<Fr> = (0..nodes.len()).map(|_| Fr::rand(rng)).collect();
    Ok(nodes
        .par_iter()
        .zip(shares.par_iter())
        .zip(nonces.into_par_iter())
        .map(|((node, share), nonce)| {
            DleqProof::prove_with_nonce(share.value, node.public_key, nonce, params)
        })
        .collect())
}
