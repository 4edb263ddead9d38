use crate::domain_name::names_equal;
use crate::{DomainError, LookupError, RecordData, RecordType, ResourceRecord, DNS_CLASS_IN};
use std::fmt;
use std::net::IpAddr;

const MAX_CNAME_REDIRECTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            other => Self::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded DNS response, independent of the codec that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub rcode: ResponseCode,
    pub recursion_available: bool,
    pub truncated: bool,
    pub answers: Vec<ResourceRecord>,
}

impl DnsMessage {
    pub fn new(id: u16, rcode: ResponseCode) -> Self {
        Self {
            id,
            rcode,
            recursion_available: true,
            truncated: false,
            answers: Vec::new(),
        }
    }

    pub fn with_answers(mut self, answers: Vec<ResourceRecord>) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_recursion_available(mut self, recursion_available: bool) -> Self {
        self.recursion_available = recursion_available;
        self
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }

    /// NXDOMAIN from a server that performed recursion, i.e. an authoritative "does not exist".
    pub fn is_recursive_name_error(&self) -> bool {
        self.rcode == ResponseCode::NXDomain && self.recursion_available
    }

    /// Extracts the records answering `name`/`qtype`, following CNAME chains.
    pub fn answer(&self, name: &str, server: &str, qtype: RecordType) -> Result<Answer, DomainError> {
        if self.is_recursive_name_error() {
            return Err(LookupError::not_found(name).into());
        }
        if !self.is_success() {
            return Err(LookupError::new(name, LookupError::SERVER_MISBEHAVING)
                .with_server(server)
                .into());
        }

        let mut current = name.to_string();
        'redirect: for _ in 0..MAX_CNAME_REDIRECTS {
            let mut records = Vec::new();
            for record in &self.answers {
                if record.class != DNS_CLASS_IN || !names_equal(&record.name, &current) {
                    continue;
                }
                if record.type_code() == qtype.to_u16() {
                    records.push(record.clone());
                } else if let RecordData::Cname(target) = &record.data {
                    current = target.clone();
                    continue 'redirect;
                }
            }

            if records.is_empty() {
                return Err(LookupError::not_found(current).with_server(server).into());
            }
            return Ok(Answer {
                canonical_name: current,
                records,
            });
        }

        Err(LookupError::new(current, LookupError::TOO_MANY_REDIRECTS)
            .with_server(server)
            .into())
    }
}

/// Records matching one question, with the name they were found under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub canonical_name: String,
    pub records: Vec<ResourceRecord>,
}

impl Answer {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Address values of the A and AAAA records, in answer order.
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.records.iter().filter_map(ResourceRecord::ip_addr).collect()
    }
}
