//! Wire codec adapter over `hickory-proto`.
mod message_builder;
mod record_type_map;
mod response_parser;

pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use response_parser::ResponseParser;
