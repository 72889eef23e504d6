pub mod cli;
pub mod config;
pub mod dns;
pub mod dns_consts;
pub mod error;
pub mod id;
pub mod net;
pub mod printer;
