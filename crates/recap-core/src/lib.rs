pub mod hash;
pub mod text;
pub mod types;

pub use hash::fingerprint;
pub use types::*;
