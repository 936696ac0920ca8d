pub mod geo;
pub mod network;
