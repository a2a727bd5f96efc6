pub mod account;
pub mod catalog;
pub mod filter;
pub mod trip;
