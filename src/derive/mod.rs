#[macro_use]
pub mod curve;
#[macro_use]
pub mod pairing;
