use ark_ff::Field;
use ark_secp256k1::{Fr, Projective};
use ark_std::{One, Zero};
use sha3::{Digest, Keccak256};

use crate::error::PvssError;
use crate::polynomial::Share;

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the Lagrange coefficients at zero for the given share indices:
/// `lambda_i = prod_{j != i} x_j / (x_j - x_i)` over the scalar field.
///
/// # Errors
/// Returns `InvalidInput` for an empty index list and `ArithmeticError` when
/// two indices coincide (the denominator vanishes).
pub fn lagrange_coefficients(indices: &[u32]) -> Result<Vec<Fr>, PvssError> {
    if indices.is_empty() {
        return Err(PvssError::InvalidInput(
            "cannot interpolate from an empty share set".to_string(),
        ));
    }

    let xs: Vec<Fr> = indices.iter().map(|&i| Fr::from(u64::from(i))).collect();
    let mut coefficients = Vec::with_capacity(indices.len());
    for (i, xi) in xs.iter().enumerate() {
        let mut numerator = Fr::one();
        let mut denominator = Fr::one();
        for (j, xj) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator *= xj;
            denominator *= *xj - xi;
        }
        let denominator_inv = denominator.inverse().ok_or_else(|| {
            PvssError::ArithmeticError(format!(
                "duplicate share index {} makes the Lagrange denominator zero",
                indices[i]
            ))
        })?;
        coefficients.push(numerator * denominator_inv);
    }
    Ok(coefficients)
}

/// Reconstructs the polynomial's constant term from plaintext shares.
pub fn interpolate_scalars(shares: &[Share]) -> Result<Fr, PvssError> {
    let indices: Vec<u32> = shares.iter().map(|s| s.index).collect();
    let lambdas = lagrange_coefficients(&indices)?;
    Ok(shares
        .iter()
        .zip(&lambdas)
        .map(|(share, lambda)| share.value * lambda)
        .fold(Fr::zero(), |acc, term| acc + term))
}

/// Reconstructs `secret * G` from decrypted public share points, i.e.
/// Lagrange interpolation in the exponent.
pub fn interpolate_points(shares: &[(u32, Projective)]) -> Result<Projective, PvssError> {
    let indices: Vec<u32> = shares.iter().map(|&(i, _)| i).collect();
    let lambdas = lagrange_coefficients(&indices)?;
    Ok(shares
        .iter()
        .zip(&lambdas)
        .map(|(&(_, point), lambda)| point * lambda)
        .fold(Projective::zero(), |acc, term| acc + term))
}
