use thiserror::Error;

/// Failures surfaced by the checked entry points of this crate.
///
/// Arithmetic itself reports failure through `subtle::CtOption`; these
/// variants are what that becomes once it reaches a caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A point does not satisfy its curve equation.
    #[error("point is not on the {0} curve")]
    NotOnCurve(&'static str),

    /// An inversion of zero was attempted.
    #[error("attempted to invert zero in {0}")]
    NonInvertible(&'static str),

    /// Bytes do not encode a valid field element or point.
    #[error("invalid encoding of {0}")]
    InvalidEncoding(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
