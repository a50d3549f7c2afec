pub mod observation;
pub mod season;

#[cfg(feature = "api")]
pub mod archive;
