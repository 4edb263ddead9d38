//! DNS query construction in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dns2host_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `name`/`record_type` carrying transaction `id`
    ///
    /// The message has the RD flag set and a single IN-class question.
    pub fn build_query(id: u16, name: &str, record_type: RecordType) -> Result<Vec<u8>, DomainError> {
        let qname = Name::from_str(name)
            .map_err(|e| DomainError::Encode(format!("invalid name '{}': {}", name, e)))?;

        let mut query = Query::new();
        query.set_name(qname);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        Self::serialize_message(&message)
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::Encode(e.to_string()))?;

        Ok(buf)
    }
}
