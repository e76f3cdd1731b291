//! Fixed-width wire encoding for interoperability across implementations.
//!
//! Scalars and field elements are 32-byte big-endian unsigned integers. A
//! curve point is `x || y` (64 bytes) with the identity encoded as all
//! zeroes, which cannot collide with a real point since (0, 0) does not
//! satisfy the curve equation. A DLEQ proof is the fixed-order concatenation
//! `(c, r, vG, vH, xG, xH)` (320 bytes); a share bundle is `threshold`
//! commitment points followed by `n` entries of encrypted share plus proof.

use ark_ff::{BigInt, BigInteger, PrimeField};
use ark_secp256k1::{Affine, Fq, Fr};

use crate::commitment::Commitment;
use crate::dleq::DleqProof;
use crate::encryption::{BundleEntry, EncryptedShare, ShareBundle};
use crate::error::PvssError;

pub const SCALAR_BYTES: usize = 32;
pub const POINT_BYTES: usize = 2 * SCALAR_BYTES;
pub const PROOF_BYTES: usize = 2 * SCALAR_BYTES + 4 * POINT_BYTES;
pub const BUNDLE_ENTRY_BYTES: usize = POINT_BYTES + PROOF_BYTES;

fn bigint_from_be(bytes: &[u8; SCALAR_BYTES]) -> BigInt<4> {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(buf);
    }
    BigInt::new(limbs)
}

/// Encodes a coordinate field element as 32 big-endian bytes.
pub fn fq_to_bytes(value: Fq) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    out.copy_from_slice(&value.into_bigint().to_bytes_be());
    out
}

/// Decodes a coordinate field element, rejecting values at or above the
/// field prime.
pub fn fq_from_bytes(bytes: &[u8; SCALAR_BYTES]) -> Result<Fq, PvssError> {
    Fq::from_bigint(bigint_from_be(bytes)).ok_or_else(|| {
        PvssError::CurveError("coordinate is not below the field prime".to_string())
    })
}

/// Encodes a scalar as 32 big-endian bytes.
pub fn fr_to_bytes(value: Fr) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    out.copy_from_slice(&value.into_bigint().to_bytes_be());
    out
}

/// Decodes a scalar, rejecting values at or above the group order.
pub fn fr_from_bytes(bytes: &[u8; SCALAR_BYTES]) -> Result<Fr, PvssError> {
    Fr::from_bigint(bigint_from_be(bytes)).ok_or_else(|| {
        PvssError::InvalidInput("scalar is not below the group order".to_string())
    })
}

/// Encodes a point as `x || y`; the identity becomes all zeroes.
pub fn point_to_bytes(point: &Affine) -> [u8; POINT_BYTES] {
    let mut out = [0u8; POINT_BYTES];
    if point.infinity {
        return out;
    }
    out[..SCALAR_BYTES].copy_from_slice(&fq_to_bytes(point.x));
    out[SCALAR_BYTES..].copy_from_slice(&fq_to_bytes(point.y));
    out
}

/// Decodes a point, verifying it satisfies the curve equation. secp256k1 has
/// cofactor 1, so on-curve implies in-group.
pub fn point_from_bytes(bytes: &[u8; POINT_BYTES]) -> Result<Affine, PvssError> {
    if bytes.iter().all(|&b| b == 0) {
        return Ok(Affine::identity());
    }
    let mut x_bytes = [0u8; SCALAR_BYTES];
    let mut y_bytes = [0u8; SCALAR_BYTES];
    x_bytes.copy_from_slice(&bytes[..SCALAR_BYTES]);
    y_bytes.copy_from_slice(&bytes[SCALAR_BYTES..]);

    let point = Affine::new_unchecked(fq_from_bytes(&x_bytes)?, fq_from_bytes(&y_bytes)?);
    if !point.is_on_curve() {
        return Err(PvssError::CurveError(format!(
            "point is not on the curve: x={}",
            hex::encode(x_bytes)
        )));
    }
    Ok(point)
}

/// Encodes a DLEQ proof as the 320-byte concatenation `(c, r, vG, vH, xG, xH)`.
pub fn proof_to_bytes(proof: &DleqProof) -> [u8; PROOF_BYTES] {
    let mut out = [0u8; PROOF_BYTES];
    out[..32].copy_from_slice(&fr_to_bytes(proof.c));
    out[32..64].copy_from_slice(&fr_to_bytes(proof.r));
    out[64..128].copy_from_slice(&point_to_bytes(&proof.v_g));
    out[128..192].copy_from_slice(&point_to_bytes(&proof.v_h));
    out[192..256].copy_from_slice(&point_to_bytes(&proof.x_g));
    out[256..].copy_from_slice(&point_to_bytes(&proof.x_h));
    out
}

/// Decodes a 320-byte DLEQ proof.
pub fn proof_from_bytes(bytes: &[u8; PROOF_BYTES]) -> Result<DleqProof, PvssError> {
    let mut scalar = [0u8; SCALAR_BYTES];
    let mut point = [0u8; POINT_BYTES];

    scalar.copy_from_slice(&bytes[..32]);
    let c = fr_from_bytes(&scalar)?;
    scalar.copy_from_slice(&bytes[32..64]);
    let r = fr_from_bytes(&scalar)?;

    point.copy_from_slice(&bytes[64..128]);
    let v_g = point_from_bytes(&point)?;
    point.copy_from_slice(&bytes[128..192]);
    let v_h = point_from_bytes(&point)?;
    point.copy_from_slice(&bytes[192..256]);
    let x_g = point_from_bytes(&point)?;
    point.copy_from_slice(&bytes[256..]);
    let x_h = point_from_bytes(&point)?;

    Ok(DleqProof {
        c,
        r,
        v_g,
        v_h,
        x_g,
        x_h,
    })
}

/// Encodes a share bundle: commitments first, then per-node entries in index
/// order.
pub fn bundle_to_bytes(bundle: &ShareBundle) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        bundle.commitments.points.len() * POINT_BYTES
            + bundle.entries.len() * BUNDLE_ENTRY_BYTES,
    );
    for point in &bundle.commitments.points {
        out.extend_from_slice(&point_to_bytes(point));
    }
    for entry in &bundle.entries {
        out.extend_from_slice(&point_to_bytes(&entry.share.point));
        out.extend_from_slice(&proof_to_bytes(&entry.proof));
    }
    out
}

/// Decodes a share bundle produced by [`bundle_to_bytes`]. The wire format
/// carries no lengths, so the session-supplied `threshold` and `n` determine
/// the layout; entry `i` is assigned node index `i + 1`.
pub fn bundle_from_bytes(
    bytes: &[u8],
    threshold: usize,
    n: usize,
) -> Result<ShareBundle, PvssError> {
    let expected = threshold * POINT_BYTES + n * BUNDLE_ENTRY_BYTES;
    if bytes.len() != expected {
        return Err(PvssError::InvalidInput(format!(
            "bundle length ({}) does not match threshold {} and n {} (expected {})",
            bytes.len(),
            threshold,
            n,
            expected
        )));
    }

    let mut point = [0u8; POINT_BYTES];
    let mut proof = [0u8; PROOF_BYTES];

    let mut points = Vec::with_capacity(threshold);
    for k in 0..threshold {
        point.copy_from_slice(&bytes[k * POINT_BYTES..(k + 1) * POINT_BYTES]);
        points.push(point_from_bytes(&point)?);
    }

    let mut entries = Vec::with_capacity(n);
    let base = threshold * POINT_BYTES;
    for i in 0..n {
        let offset = base + i * BUNDLE_ENTRY_BYTES;
        point.copy_from_slice(&bytes[offset..offset + POINT_BYTES]);
        proof.copy_from_slice(&bytes[offset + POINT_BYTES..offset + BUNDLE_ENTRY_BYTES]);
        entries.push(BundleEntry {
            share: EncryptedShare {
                index: (i + 1) as u32,
                point: point_from_bytes(&point)?,
            },
            proof: proof_from_bytes(&proof)?,
        });
    }

    Ok(ShareBundle {
        commitments: Commitment { points },
        entries,
    })
}
