//! Subcommand implementations.

pub mod accounts;
pub mod clear;
pub mod deluser;
pub mod histogram;
pub mod list;
pub mod login;
pub mod query;
pub mod range;
pub mod repo;
pub mod reqid;
pub mod sample;
pub mod switch;
