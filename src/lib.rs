#[macro_use]
mod macros;

pub mod arithmetic;
pub mod encoding;
pub mod ff_ext;
pub mod gg22d7;

#[macro_use]
mod derive;
mod error;

// Re-export to simplify downstream dependencies.
pub use ff;
pub use group;
pub use pairing;

pub use arithmetic::{Coordinates, CurveAffine, CurveExt};
pub use error::{Error, Result};

#[cfg(test)]
pub mod tests;
