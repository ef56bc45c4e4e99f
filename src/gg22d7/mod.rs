//! The GG22D7-457 curve: a 457-bit prime field curve with embedding degree 22
//! and a D-type twist of degree 2 over the degree-11 extension.

mod engine;
mod fp;
mod fp11;
mod fp22;
mod fr;
mod g1;
mod g2;
mod isogeny;
mod params;
mod super_optimal;

pub use engine::*;
pub use fp::*;
pub use fp11::*;
pub use fp22::*;
pub use fr::*;
pub use g1::*;
pub use g2::*;
pub use isogeny::*;
pub use params::*;
pub use super_optimal::*;

/// |x| for the curve seed x = −779523.
pub const SEED_ABS: u64 = 779523;

/// The seed x is negative.
pub const SEED_IS_NEGATIVE: bool = true;

/// |x| in non-adjacent form, least significant digit first.
pub const SEED_NAF: [i8; 21] = [
    -1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, -1, 0, 0, 0, 0, -1, 0, 1,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seed_naf() {
        assert_eq!(crate::arithmetic::naf(&[SEED_ABS]), SEED_NAF.to_vec());
    }
}
