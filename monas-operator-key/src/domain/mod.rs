pub mod address;
pub mod encoding;
pub mod envelope;
pub mod private_scalar;
