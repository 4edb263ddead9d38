use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("DNS name too long: {0}")]
    NameTooLong(String),

    #[error("no such host: {0:?}")]
    NoSuchHost(String),

    #[error("invalid resolver address: {0}")]
    InvalidResolverAddress(String),

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("{message}")]
    Transport { message: String, timeout: bool },

    #[error("DNS message ID mismatch: sent {sent}, received {received}")]
    IdMismatch { sent: u16, received: u16 },

    #[error("cannot unmarshal DNS message: {0}")]
    Decode(String),

    #[error("cannot marshal DNS message: {0}")]
    Encode(String),

    #[error("no answer from DNS server")]
    ExhaustedTransports,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl DomainError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    pub fn transport_timeout(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: true,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { timeout, .. } => *timeout,
            Self::Lookup(err) => err.is_timeout,
            _ => false,
        }
    }

    /// Name carried by the error, when it is tagged with one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::InvalidDomainName(name) | Self::NameTooLong(name) | Self::NoSuchHost(name) => {
                Some(name)
            }
            Self::Lookup(err) => Some(&err.name),
            _ => None,
        }
    }
}

/// Failure of a lookup against one resolver, tagged with the queried name
/// and the resolver target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    pub name: String,
    pub server: Option<String>,
    pub message: String,
    pub is_timeout: bool,
    pub is_not_found: bool,
    cause: Option<Box<DomainError>>,
}

impl LookupError {
    pub const NO_SUCH_HOST: &'static str = "no such host";
    pub const SERVER_MISBEHAVING: &'static str = "server misbehaving";
    pub const TOO_MANY_REDIRECTS: &'static str = "too many redirects";

    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: None,
            message: message.into(),
            is_timeout: false,
            is_not_found: false,
            cause: None,
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self {
            is_not_found: true,
            ..Self::new(name, Self::NO_SUCH_HOST)
        }
    }

    /// Wraps an exchange failure, keeping it reachable through `source()`.
    pub fn from_exchange(name: impl Into<String>, server: impl Into<String>, err: DomainError) -> Self {
        Self {
            name: name.into(),
            server: Some(server.into()),
            message: err.to_string(),
            is_timeout: err.is_timeout(),
            is_not_found: false,
            cause: Some(Box::new(err)),
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn cause(&self) -> Option<&DomainError> {
        self.cause.as_deref()
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup {}", self.name)?;
        if let Some(server) = &self.server {
            write!(f, " on {}", server)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
