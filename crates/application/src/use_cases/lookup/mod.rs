mod lookup_host;
mod resolve_name;
mod try_one_name;

pub use lookup_host::LookupHostUseCase;
pub use resolve_name::ResolveNameUseCase;
pub use try_one_name::TryOneNameUseCase;
