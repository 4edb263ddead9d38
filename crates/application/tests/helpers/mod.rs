#![allow(dead_code)]
#![allow(unused_imports)]

mod mock_exchanger;

pub use mock_exchanger::{ExchangeCall, MockDnsExchanger};

use dns2host_domain::{DnsMessage, ResourceRecord, ResponseCode};
use std::net::Ipv4Addr;

pub fn a_reply(name: &str, addrs: &[Ipv4Addr]) -> DnsMessage {
    DnsMessage::new(0, ResponseCode::NoError).with_answers(
        addrs
            .iter()
            .map(|addr| ResourceRecord::a(name, *addr))
            .collect(),
    )
}

pub fn rcode_reply(rcode: ResponseCode, recursion_available: bool) -> DnsMessage {
    DnsMessage::new(0, rcode).with_recursion_available(recursion_available)
}
