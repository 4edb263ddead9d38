mod record;
mod record_type;

pub use record::{RecordData, ResourceRecord, DNS_CLASS_IN};
pub use record_type::RecordType;
