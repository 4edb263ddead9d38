use super::RecordType;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub const DNS_CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    /// Any record type the resolver does not interpret, by its wire code.
    Other(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            class: DNS_CLASS_IN,
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<String>, addr: Ipv4Addr) -> Self {
        Self::new(name, 300, RecordData::A(addr))
    }

    pub fn aaaa(name: impl Into<String>, addr: Ipv6Addr) -> Self {
        Self::new(name, 300, RecordData::Aaaa(addr))
    }

    pub fn cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, 300, RecordData::Cname(target.into()))
    }

    pub fn type_code(&self) -> u16 {
        match &self.data {
            RecordData::A(_) => RecordType::A.to_u16(),
            RecordData::Aaaa(_) => RecordType::AAAA.to_u16(),
            RecordData::Cname(_) => RecordType::CNAME.to_u16(),
            RecordData::Other(code) => *code,
        }
    }

    pub fn ip_addr(&self) -> Option<IpAddr> {
        match &self.data {
            RecordData::A(addr) => Some(IpAddr::V4(*addr)),
            RecordData::Aaaa(addr) => Some(IpAddr::V6(*addr)),
            _ => None,
        }
    }
}
