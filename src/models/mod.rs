pub mod profile;
pub mod summary;

pub use profile::*;
pub use summary::*;
