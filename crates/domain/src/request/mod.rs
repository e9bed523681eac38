//! Request types
//!
//! Types describing an outbound call: method, headers, and the request
//! descriptor that the refresh coordinator reissues after a credential
//! refresh.

mod descriptor;
mod header;
mod method;

pub use descriptor::RequestDescriptor;
pub use header::{Header, Headers};
pub use method::HttpMethod;
