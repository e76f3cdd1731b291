/// Error types for the PVSS engine
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PvssError {
    /// Malformed caller input (mismatched list lengths, out-of-range threshold or index)
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A DLEQ or Feldman check failed. This flags untrusted data from a faulty
    /// or malicious dealer/node, not a local bug; the session layer turns it
    /// into a complaint against the offending node.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    /// Point decoding failed or a decoded point is off-curve
    #[error("curve error: {0}")]
    CurveError(String),
    /// The hash-to-curve search exceeded its iteration cap
    #[error("hash-to-point search exhausted after {0} iterations")]
    HashToPointExhausted(usize),
    /// Scalar arithmetic failed (e.g. inverse of zero)
    #[error("arithmetic error: {0}")]
    ArithmeticError(String),
}
