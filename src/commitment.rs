//! Feldman commitments to the sharing polynomial.

use ark_ec::{AffineRepr, CurveGroup};
use ark_secp256k1::{Affine, Fr, Projective};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::One;

use crate::params::CurveParams;
use crate::polynomial::SharingPolynomial;

/// One curve point `C_k = coeff_k * G` per polynomial coefficient. Published
/// alongside the encrypted shares; reveals nothing about the coefficients
/// under discrete-log hardness.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Commitment {
    pub points: Vec<Affine>,
}

impl Commitment {
    /// Commits to every coefficient of `poly` against the primary generator.
    pub fn to_polynomial(poly: &SharingPolynomial, params: &CurveParams) -> Self {
        let points = poly
            .coefficients()
            .iter()
            .map(|coeff| (params.g * coeff).into_affine())
            .collect();
        Commitment { points }
    }

    /// The number of committed coefficients, i.e. the sharing threshold.
    pub fn threshold(&self) -> usize {
        self.points.len()
    }

    /// `sum_k C_k * index^k`, the public image of the share at `index`.
    pub fn expected_share(&self, index: u32) -> Projective {
        let x = Fr::from(u64::from(index));
        let mut x_power = Fr::one();
        let mut acc = Projective::from(self.points[0]);
        for point in &self.points[1..] {
            x_power *= x;
            acc += *point * x_power;
        }
        acc
    }

    /// Checks a plaintext share value against the commitment: true iff
    /// `value * G == sum_k C_k * index^k`.
    pub fn verify_share(&self, index: u32, value: Fr, params: &CurveParams) -> bool {
        self.verify_share_point(index, &(params.g * value).into_affine())
    }

    /// Checks an already-public share point (`value * G`) against the
    /// commitment, as done after verifiable decryption.
    pub fn verify_share_point(&self, index: u32, point: &Affine) -> bool {
        if self.points.is_empty() || index == 0 {
            return false;
        }
        self.expected_share(index) == point.into_group()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::SharingPolynomial;
    use ark_std::UniformRand;

    #[test]
    fn test_all_generated_shares_verify() {
        let mut rng = ark_std::test_rng();
        let params = CurveParams::secp256k1().unwrap();
        let poly = SharingPolynomial::random(Fr::rand(&mut rng), 4, &mut rng).unwrap();
        let commitment = Commitment::to_polynomial(&poly, &params);
        assert_eq!(commitment.threshold(), 4);

        for share in poly.generate_shares(7) {
            assert!(
                commitment.verify_share(share.index, share.value, &params),
                "share {} failed verification",
                share.index
            );
        }
    }

    #[test]
    fn test_mutated_share_fails_verification() {
        let mut rng = ark_std::test_rng();
        let params = CurveParams::secp256k1().unwrap();
        let poly = SharingPolynomial::random(Fr::rand(&mut rng), 3, &mut rng).unwrap();
        let commitment = Commitment::to_polynomial(&poly, &params);
        let share = poly.generate_shares(5)[2];

        // flip the lowest bit of the value
        let flipped = share.value + Fr::one();
        assert!(!commitment.verify_share(share.index, flipped, &params));
        // wrong index also fails
        assert!(!commitment.verify_share(share.index + 1, share.value, &params));
    }

    #[test]
    fn test_index_zero_is_never_accepted() {
        let mut rng = ark_std::test_rng();
        let params = CurveParams::secp256k1().unwrap();
        let secret = Fr::rand(&mut rng);
        let poly = SharingPolynomial::random(secret, 2, &mut rng).unwrap();
        let commitment = Commitment::to_polynomial(&poly, &params);
        // index 0 would reveal the secret itself
        assert!(!commitment.verify_share(0, secret, &params));
    }
}
