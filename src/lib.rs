pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod library;
pub mod naming;
pub mod storage;
