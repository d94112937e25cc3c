pub mod filter;
pub mod segment;
