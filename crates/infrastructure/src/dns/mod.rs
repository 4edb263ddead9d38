pub mod codec;
pub mod exchange;
pub mod resolver;
pub mod transport;

pub use codec::{MessageBuilder, RecordTypeMapper, ResponseParser};
pub use exchange::WireExchanger;
pub use resolver::StubResolver;
pub use transport::{dial, DnsConnection};
