//! dns2host infrastructure: sockets, the wire codec and the stub resolver.
pub mod dns;

pub use dns::resolver::{lookup_host, lookup_ip, StubResolver};
