pub mod header;
pub mod outputs;
