pub mod filter;
pub mod search;
pub mod seed;
pub mod store;
