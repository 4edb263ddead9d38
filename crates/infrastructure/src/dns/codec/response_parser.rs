use dns2host_domain::{DnsMessage, DomainError, RecordData, ResourceRecord, ResponseCode};
use hickory_proto::op::Message;
use hickory_proto::rr::{RData, Record};
use tracing::debug;

/// Decodes wire replies into the codec-independent [`DnsMessage`].
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message =
            Message::from_vec(response_bytes).map_err(|e| DomainError::Decode(e.to_string()))?;

        let answers: Vec<ResourceRecord> = message.answers().iter().map(Self::convert).collect();
        let parsed = DnsMessage {
            id: message.id(),
            rcode: ResponseCode::from_u16(u16::from(message.response_code())),
            recursion_available: message.recursion_available(),
            truncated: message.truncated(),
            answers,
        };

        debug!(
            id = parsed.id,
            rcode = %parsed.rcode,
            answers = parsed.answers.len(),
            truncated = parsed.truncated,
            recursion_available = parsed.recursion_available,
            "DNS response parsed"
        );

        Ok(parsed)
    }

    fn convert(record: &Record) -> ResourceRecord {
        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
            RData::CNAME(canonical) => RecordData::Cname(canonical.to_utf8()),
            _ => RecordData::Other(u16::from(record.record_type())),
        };

        ResourceRecord {
            name: record.name().to_utf8(),
            class: u16::from(record.dns_class()),
            ttl: record.ttl(),
            data,
        }
    }
}
