//! Publicly Verifiable Secret Sharing
//!
//! This library implements the PVSS engine at the heart of a distributed key
//! generation node network: a dealer splits a secret into shares encrypted
//! to node public keys, and any third party can audit, without learning the
//! secret or any share, that every node received a share consistent with
//! the published Feldman commitment.
//!
//! ## Overview
//!
//! - **Parameters**: fixed secp256k1 generators, with the secondary
//!   generator derived by hash-to-curve so its discrete log is unknown
//! - **Dealing**: Shamir polynomial, Feldman commitments, per-node encrypted
//!   shares and Chaum-Pedersen DLEQ proofs in one broadcastable bundle
//! - **Auditing**: bundle-wide verification from public data only
//! - **Decryption**: per-node verified decryption that emits a fresh DLEQ
//!   proof, so the decrypted share is accepted without trusting the node
//!
//! Reconstruction from a threshold of decrypted shares is a session-level
//! concern; the Lagrange interpolation it needs lives in [`utils`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use ark_secp256k1::Fr;
//! use ark_std::UniformRand;
//! use pvss::{
//!     decryption::{decrypt_share, verify_decryption},
//!     encryption::{encrypt_shares, verify_bundle},
//!     keys::{NodeRecord, SecretKey},
//!     params::CurveParams,
//! };
//!
//! let mut rng = ark_std::test_rng();
//! let params = CurveParams::secp256k1().unwrap();
//! let n = 5; // number of nodes
//! let t = 3; // reconstruction threshold
//!
//! // Node key material (normally owned by the node registry)
//! let keys: Vec<SecretKey> = (0..n).map(|_| SecretKey::new(&mut rng)).collect();
//! let nodes: Vec<NodeRecord> = keys
//!     .iter()
//!     .enumerate()
//!     .map(|(i, key)| NodeRecord {
//!         index: i as u32 + 1,
//!         public_key: key.public_key(&params),
//!     })
//!     .collect();
//!
//! // Dealing
//! let secret = Fr::rand(&mut rng);
//! let bundle = encrypt_shares(secret, &nodes, t, &params, &mut rng).unwrap();
//!
//! // Any third party audits the bundle from public data
//! verify_bundle(&bundle, &nodes, &params).unwrap();
//!
//! // A node decrypts its share and re-proves the decryption
//! let entry = &bundle.entries[0];
//! let decrypted = decrypt_share(
//!     &entry.share,
//!     &entry.proof,
//!     &bundle.commitments,
//!     &keys[0],
//!     &params,
//!     &mut rng,
//! )
//! .unwrap();
//! verify_decryption(&decrypted, &entry.share, &nodes[0], &params).unwrap();
//! ```

pub mod commitment;
pub mod decryption;
pub mod dleq;
pub mod encoding;
pub mod encryption;
pub mod error;
pub mod keys;
pub mod params;
pub mod polynomial;
pub mod utils;

pub use error::PvssError;
