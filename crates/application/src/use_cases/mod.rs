pub mod lookup;

pub use lookup::{LookupHostUseCase, ResolveNameUseCase, TryOneNameUseCase};
