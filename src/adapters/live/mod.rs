//! Live adapters that talk to real services.

pub mod clipdrop;
pub mod http;
