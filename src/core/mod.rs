pub mod minter;
pub mod vocab;

pub use minter::{EntityKind, UriMinter};
