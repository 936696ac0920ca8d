pub mod implementations;
pub mod traits;
