mod dns_exchanger;

pub use dns_exchanger::DnsExchanger;
