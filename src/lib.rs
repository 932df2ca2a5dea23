pub mod config;
pub mod error;
pub mod ipv4;
pub mod registry;
pub mod session;

pub use error::AddressError;
pub use ipv4::{classify, parse, Address, NetworkClass};
pub use registry::{Registry, Report};
