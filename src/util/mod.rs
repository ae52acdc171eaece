pub mod styling;
pub mod unicode;
