//! The dealer side: turning a secret into a broadcastable, publicly
//! verifiable bundle of encrypted shares.

use ark_secp256k1::{Affine, Fr};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use rayon::prelude::*;
use tracing::debug;

use crate::commitment::Commitment;
use crate::dleq::{self, DleqProof};
use crate::error::PvssError;
use crate::keys::NodeRecord;
use crate::params::CurveParams;
use crate::polynomial::SharingPolynomial;

/// A share encrypted to one node: `point = share_value * node_public_key`.
/// Only the holder of the node's private key can recover the share point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct EncryptedShare {
    pub index: u32,
    pub point: Affine,
}

/// One node's slot in the bundle: its encrypted share plus the dealer's DLEQ
/// proof tying the share to the node's public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct BundleEntry {
    pub share: EncryptedShare,
    pub proof: DleqProof,
}

/// The unit broadcast to the network: Feldman commitments plus one entry per
/// node, in node-index order. Immutable once produced; reveals nothing about
/// any share value, yet lets any third party run [`verify_bundle`].
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ShareBundle {
    pub commitments: Commitment,
    pub entries: Vec<BundleEntry>,
}

/// Splits `secret` into `nodes.len()` encrypted shares with reconstruction
/// threshold `threshold` and proves every share consistent with the
/// published commitment.
///
/// # Errors
/// `InvalidInput` if the node list is empty, the threshold is out of range,
/// or the node indices are not dense and 1-based.
pub fn encrypt_shares<R: RngCore>(
    secret: Fr,
    nodes: &[NodeRecord],
    threshold: usize,
    params: &CurveParams,
    rng: &mut R,
) -> Result<ShareBundle, PvssError> {
    let n = nodes.len();
    if n == 0 {
        return Err(PvssError::InvalidInput(
            "node list cannot be empty".to_string(),
        ));
    }
    if threshold == 0 || threshold > n {
        return Err(PvssError::InvalidInput(format!(
            "threshold ({}) must be between 1 and the node count ({})",
            threshold, n
        )));
    }
    for (i, node) in nodes.iter().enumerate() {
        if node.index as usize != i + 1 {
            return Err(PvssError::InvalidInput(format!(
                "node indices must be dense and 1-based, found {} at position {}",
                node.index, i
            )));
        }
    }

    debug!(nodes = n, threshold, "dealing encrypted shares");

    let poly = SharingPolynomial::random(secret, threshold, rng)?;
    let shares = poly.generate_shares(n);
    let commitments = Commitment::to_polynomial(&poly, params);
    let proofs = dleq::batch_prove(nodes, &shares, params, rng)?;

    // x_h of each proof is share_value * public_key, i.e. the encrypted share
    let entries = shares
        .iter()
        .zip(proofs)
        .map(|(share, proof)| BundleEntry {
            share: EncryptedShare {
                index: share.index,
                point: proof.x_h,
            },
            proof,
        })
        .collect();

    Ok(ShareBundle {
        commitments,
        entries,
    })
}

/// Third-party audit of a bundle without any secret material: per node,
/// verify the DLEQ proof against the node's public key, check the proof's
/// `xH` equals the published encrypted share, and check the proof's `xG`
/// (the public share image) against the Feldman commitments.
///
/// # Errors
/// `InvalidInput` on a shape mismatch, `InvalidProof` naming the first node
/// whose entry fails. The caller's session layer handles a failure as a
/// complaint against the dealer.
pub fn verify_bundle(
    bundle: &ShareBundle,
    nodes: &[NodeRecord],
    params: &CurveParams,
) -> Result<(), PvssError> {
    if bundle.entries.len() != nodes.len() {
        return Err(PvssError::InvalidInput(format!(
            "bundle has {} entries for {} nodes",
            bundle.entries.len(),
            nodes.len()
        )));
    }

    nodes
        .par_iter()
        .zip(bundle.entries.par_iter())
        .try_for_each(|(node, entry)| {
            if entry.share.index != node.index {
                return Err(PvssError::InvalidInput(format!(
                    "entry index {} does not match node index {}",
                    entry.share.index, node.index
                )));
            }
            entry.proof.verify(node.public_key, params).map_err(|e| {
                PvssError::InvalidProof(format!("node {}: {}", node.index, e))
            })?;
            if entry.share.point != entry.proof.x_h {
                return Err(PvssError::InvalidProof(format!(
                    "node {}: encrypted share does not match the proof",
                    node.index
                )));
            }
            if !bundle
                .commitments
                .verify_share_point(node.index, &entry.proof.x_g)
            {
                return Err(PvssError::InvalidProof(format!(
                    "node {}: share image inconsistent with the commitments",
                    node.index
                )));
            }
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SecretKey;
    use ark_ec::CurveGroup;
    use ark_std::UniformRand;

    fn setup(n: usize) -> (CurveParams, Vec<SecretKey>, Vec<NodeRecord>) {
        let mut rng = ark_std::test_rng();
        let params = CurveParams::secp256k1().unwrap();
        let keys: Vec<SecretKey> = (0..n).map(|_| SecretKey::new(&mut rng)).collect();
        let nodes = keys
            .iter()
            .enumerate()
            .map(|(i, key)| NodeRecord {
                index: i as u32 + 1,
                public_key: key.public_key(&params),
            })
            .collect();
        (params, keys, nodes)
    }

    #[test]
    fn test_bundle_shape_and_public_verification() {
        let mut rng = ark_std::test_rng();
        let (params, _, nodes) = setup(5);
        let bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 3, &params, &mut rng).unwrap();

        assert_eq!(bundle.commitments.threshold(), 3);
        assert_eq!(bundle.entries.len(), 5);
        verify_bundle(&bundle, &nodes, &params).unwrap();
    }

    #[test]
    fn test_threshold_bounds_are_enforced() {
        let mut rng = ark_std::test_rng();
        let (params, _, nodes) = setup(4);
        let secret = Fr::rand(&mut rng);

        assert!(matches!(
            encrypt_shares(secret, &nodes, 0, &params, &mut rng),
            Err(PvssError::InvalidInput(_))
        ));
        assert!(matches!(
            encrypt_shares(secret, &nodes, 5, &params, &mut rng),
            Err(PvssError::InvalidInput(_))
        ));
        assert!(matches!(
            encrypt_shares(secret, &[], 1, &params, &mut rng),
            Err(PvssError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sparse_node_indices_are_rejected() {
        let mut rng = ark_std::test_rng();
        let (params, _, mut nodes) = setup(3);
        nodes[1].index = 7;
        assert!(matches!(
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng),
            Err(PvssError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_boundary_thresholds_produce_verifiable_bundles() {
        let mut rng = ark_std::test_rng();
        let (params, _, nodes) = setup(4);
        let secret = Fr::rand(&mut rng);

        for threshold in [1, 4] {
            let bundle = encrypt_shares(secret, &nodes, threshold, &params, &mut rng).unwrap();
            verify_bundle(&bundle, &nodes, &params).unwrap();
        }
    }

    #[test]
    fn test_tampered_entry_is_detected() {
        let mut rng = ark_std::test_rng();
        let (params, _, nodes) = setup(4);
        let mut bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();

        // replace node 3's encrypted share with a random point
        bundle.entries[2].share.point =
            (params.g * Fr::rand(&mut rng)).into_affine();
        let err = verify_bundle(&bundle, &nodes, &params).unwrap_err();
        assert!(matches!(err, PvssError::InvalidProof(_)));
        assert!(err.to_string().contains("node 3"));
    }

    #[test]
    fn test_swapped_entries_are_detected() {
        let mut rng = ark_std::test_rng();
        let (params, _, nodes) = setup(4);
        let mut bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();

        bundle.entries.swap(0, 1);
        assert!(verify_bundle(&bundle, &nodes, &params).is_err());
    }
}
