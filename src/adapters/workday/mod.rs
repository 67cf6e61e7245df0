//! Workday tenant integration
//!
//! Token acquisition, the XML transport, the response DOM/accessors, and
//! the per-entity services built on top of them.

pub mod auth;
pub mod services;
pub mod transport;
pub mod xml;

pub use auth::WorkdayConnector;
pub use transport::{with_retry, Transport};
pub use xml::XmlNode;
