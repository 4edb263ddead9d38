use crate::ports::DnsExchanger;
use dns2host_domain::domain_name::MAX_NAME_LEN;
use dns2host_domain::{Answer, DomainError, LookupError, RecordType};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Queries one fully-qualified name for one record type and classifies the reply.
pub struct TryOneNameUseCase {
    exchanger: Arc<dyn DnsExchanger>,
}

impl TryOneNameUseCase {
    pub fn new(exchanger: Arc<dyn DnsExchanger>) -> Self {
        Self { exchanger }
    }

    /// Returns the matching records, or an empty answer when the reply is not
    /// conclusive and the caller should move on to its next candidate.
    ///
    /// A reply is conclusive when records were extracted, when the server
    /// answered NOERROR, or when it answered NXDOMAIN after recursing. An
    /// NXDOMAIN from a server that did not recurse, or any other failure
    /// code, is a miss rather than an error.
    pub async fn execute(
        &self,
        server: SocketAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<Answer, DomainError> {
        if name.len() >= MAX_NAME_LEN {
            return Err(DomainError::NameTooLong(name.to_string()));
        }

        let target = server.to_string();
        let message = match self
            .exchanger
            .exchange(server, name, record_type, timeout)
            .await
        {
            Ok(message) => message,
            Err(e) => {
                debug!(name = %name, server = %target, record_type = %record_type, error = %e, "Exchange failed");
                return Err(LookupError::from_exchange(name, target, e).into());
            }
        };

        let result = message.answer(name, &target, record_type);
        if result.is_ok() || message.is_success() || message.is_recursive_name_error() {
            return result;
        }

        debug!(
            name = %name,
            server = %target,
            record_type = %record_type,
            rcode = %message.rcode,
            recursion_available = message.recursion_available,
            "Inconclusive reply, treating as a miss"
        );
        Ok(Answer::default())
    }
}
