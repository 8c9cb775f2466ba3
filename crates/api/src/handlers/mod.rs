pub mod build;
pub mod owner;
