pub mod analysis;
pub mod processing;
