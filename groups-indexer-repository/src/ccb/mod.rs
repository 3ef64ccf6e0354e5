//! Membership API implementation of `GroupSource`.

mod client;

pub use client::CcbClient;
