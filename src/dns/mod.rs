//! DNS capabilities: MX queries and hostname-to-address resolution.
//!
//! The engine depends only on the [`MxLookup`] and [`AddressLookup`] traits.
//! [`HickoryLookup`] implements both with `hickory-resolver`.

mod backend;
mod lookup;
mod records;
mod resolution;

// Re-export public API
pub use backend::HickoryLookup;
pub use lookup::{AddressLookup, LookupError, MxAnswer, MxLookup};
pub use records::lookup_mx_records;
pub use resolution::resolve_host_addresses;
