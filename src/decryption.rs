//! The node side: verifying, decrypting, and re-proving a received share.

use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_secp256k1::Affine;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use tracing::debug;

use crate::commitment::Commitment;
use crate::dleq::DleqProof;
use crate::encryption::EncryptedShare;
use crate::error::PvssError;
use crate::keys::{NodeRecord, SecretKey};
use crate::params::CurveParams;

/// A node's verifiably decrypted share: the public share point
/// `share_value * G` and a DLEQ proof that the decryption used the key
/// matching the node's registered public key. Other parties accept the point
/// via [`verify_decryption`] without trusting the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct DecryptedShare {
    pub index: u32,
    pub point: Affine,
    pub proof: DleqProof,
}

/// Verifies and decrypts this node's entry of a broadcast bundle.
///
/// With `S = share_value * d * G` the decryption is `P = d^{-1} * S`, which
/// must equal the publicly committed share image. A fresh DLEQ proof over
/// bases `(G, P)` attests that the same `d` links `G -> public_key` and
/// `P -> S`.
///
/// # Errors
/// `InvalidProof` if the dealer's proof or the Feldman check rejects (a
/// faulty dealer, to be raised as a complaint, not a local bug);
/// `ArithmeticError` if the private key is zero.
pub fn decrypt_share<R: RngCore>(
    encrypted: &EncryptedShare,
    dealer_proof: &DleqProof,
    commitments: &Commitment,
    key: &SecretKey,
    params: &CurveParams,
    rng: &mut R,
) -> Result<DecryptedShare, PvssError> {
    let public_key = key.public_key(params);
    dealer_proof.verify(public_key, params).map_err(|e| {
        PvssError::InvalidProof(format!("dealer proof for share {}: {}", encrypted.index, e))
    })?;
    if encrypted.point != dealer_proof.x_h {
        return Err(PvssError::InvalidProof(format!(
            "encrypted share {} does not match the dealer proof",
            encrypted.index
        )));
    }

    let key_inverse = key.expose().inverse().ok_or_else(|| {
        PvssError::ArithmeticError("private key has no inverse".to_string())
    })?;
    let point = (encrypted.point * key_inverse).into_affine();

    if !commitments.verify_share_point(encrypted.index, &point) {
        return Err(PvssError::InvalidProof(format!(
            "decrypted share {} is inconsistent with the commitments",
            encrypted.index
        )));
    }

    debug!(index = encrypted.index, "decrypted and re-proved share");

    let proof = DleqProof::prove(*key.expose(), point, params, rng);
    Ok(DecryptedShare {
        index: encrypted.index,
        point,
        proof,
    })
}

/// Third-party check of a node's decrypted share: the DLEQ proof must verify
/// against base `P` and tie the node's registered public key to the
/// published encrypted share.
///
/// # Errors
/// `InvalidProof` if any check rejects; handled at the protocol level as a
/// complaint against the decrypting node.
pub fn verify_decryption(
    decrypted: &DecryptedShare,
    encrypted: &EncryptedShare,
    node: &NodeRecord,
    params: &CurveParams,
) -> Result<(), PvssError> {
    if decrypted.index != node.index || encrypted.index != node.index {
        return Err(PvssError::InvalidInput(format!(
            "share indices ({}, {}) do not match node index {}",
            decrypted.index, encrypted.index, node.index
        )));
    }
    decrypted.proof.verify(decrypted.point, params).map_err(|e| {
        PvssError::InvalidProof(format!("decryption proof for node {}: {}", node.index, e))
    })?;
    if decrypted.proof.x_g != node.public_key {
        return Err(PvssError::InvalidProof(format!(
            "node {}: decryption proof is not bound to the registered key",
            node.index
        )));
    }
    if decrypted.proof.x_h != encrypted.point {
        return Err(PvssError::InvalidProof(format!(
            "node {}: decryption proof is not bound to the encrypted share",
            node.index
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::{encrypt_shares, verify_bundle};
    use crate::utils::interpolate_points;
    use ark_ec::AffineRepr;
    use ark_secp256k1::Fr;
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
    fn test_decryption_yields_committed_share_point() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(4);
        let bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();

        for (i, entry) in bundle.entries.iter().enumerate() {
            let decrypted = decrypt_share(
                &entry.share,
                &entry.proof,
                &bundle.commitments,
                &keys[i],
                &params,
                &mut rng,
            )
            .unwrap();
            // the decrypted point is exactly the committed share image
            assert_eq!(
                decrypted.point.into_group(),
                bundle.commitments.expected_share(entry.share.index)
            );
            verify_decryption(&decrypted, &entry.share, &nodes[i], &params).unwrap();
        }
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(3);
        let bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();

        // node 2's key against node 1's entry: the dealer proof is bound to
        // node 1's public key, so verification rejects before decryption
        let entry = &bundle.entries[0];
        assert!(matches!(
            decrypt_share(
                &entry.share,
                &entry.proof,
                &bundle.commitments,
                &keys[1],
                &params,
                &mut rng,
            ),
            Err(PvssError::InvalidProof(_))
        ));
    }

    #[test]
    fn test_foreign_commitments_fail_the_feldman_check() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(3);
        let bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();
        let other_bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();

        let entry = &bundle.entries[0];
        assert!(matches!(
            decrypt_share(
                &entry.share,
                &entry.proof,
                &other_bundle.commitments,
                &keys[0],
                &params,
                &mut rng,
            ),
            Err(PvssError::InvalidProof(_))
        ));
    }

    #[test]
    fn test_forged_decryption_is_rejected() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(3);
        let bundle =
            encrypt_shares(Fr::rand(&mut rng), &nodes, 2, &params, &mut rng).unwrap();

        let entry = &bundle.entries[0];
        let mut decrypted = decrypt_share(
            &entry.share,
            &entry.proof,
            &bundle.commitments,
            &keys[0],
            &params,
            &mut rng,
        )
        .unwrap();

        decrypted.point = (params.g * Fr::rand(&mut rng)).into_affine();
        assert!(verify_decryption(&decrypted, &entry.share, &nodes[0], &params).is_err());
    }

    #[test]
    fn test_end_to_end_three_of_five() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(5);
        let secret = Fr::from(42u64);

        let bundle = encrypt_shares(secret, &nodes, 3, &params, &mut rng).unwrap();
        verify_bundle(&bundle, &nodes, &params).unwrap();

        // decrypt with nodes 1, 3, 5 and interpolate in the exponent
        let mut decrypted_points = Vec::new();
        for &i in &[0usize, 2, 4] {
            let entry = &bundle.entries[i];
            let decrypted = decrypt_share(
                &entry.share,
                &entry.proof,
                &bundle.commitments,
                &keys[i],
                &params,
                &mut rng,
            )
            .unwrap();
            verify_decryption(&decrypted, &entry.share, &nodes[i], &params).unwrap();
            decrypted_points.push((decrypted.index, decrypted.point.into_group()));
        }

        let reconstructed = interpolate_points(&decrypted_points).unwrap();
        assert_eq!(reconstructed, params.g * secret);
    }

    #[test]
    fn test_threshold_n_sub_threshold_set_fails_to_reconstruct() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(4);
        let secret = Fr::rand(&mut rng);

        let bundle = encrypt_shares(secret, &nodes, 4, &params, &mut rng).unwrap();
        let mut decrypted_points = Vec::new();
        for i in 0..3 {
            let entry = &bundle.entries[i];
            let decrypted = decrypt_share(
                &entry.share,
                &entry.proof,
                &bundle.commitments,
                &keys[i],
                &params,
                &mut rng,
            )
            .unwrap();
            decrypted_points.push((decrypted.index, decrypted.point.into_group()));
        }

        // t - 1 shares interpolate to a wrong value
        let reconstructed = interpolate_points(&decrypted_points).unwrap();
        assert_ne!(reconstructed, params.g * secret);
    }

    #[test]
    fn test_threshold_one_share_is_the_secret_image() {
        let mut rng = ark_std::test_rng();
        let (params, keys, nodes) = setup(3);
        let secret = Fr::rand(&mut rng);

        let bundle = encrypt_shares(secret, &nodes, 1, &params, &mut rng).unwrap();
        let entry = &bundle.entries[1];
        let decrypted = decrypt_share(
            &entry.share,
            &entry.proof,
            &bundle.commitments,
            &keys[1],
            &params,
            &mut rng,
        )
        .unwrap();
        assert_eq!(decrypted.point.into_group(), params.g * secret);
    }
}
