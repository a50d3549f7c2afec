pub mod aggregate;
pub mod error;
pub mod fence;
pub mod sector;
pub mod transport;
