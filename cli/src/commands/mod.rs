pub mod account;
pub mod collection;
pub mod company;
pub mod config;
pub mod establishment;
pub mod init;
pub mod product;
pub mod purchase;
pub mod supplier;
