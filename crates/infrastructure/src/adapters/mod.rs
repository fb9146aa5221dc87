//! Backend and system adapters.

mod erp_transport;
mod http;
mod search_transport;
mod system_clock;

pub use erp_transport::{PROXY_PREFIX, ReqwestErpTransport, proxy_target};
pub use http::decode_body;
pub use search_transport::ReqwestSearchTransport;
pub use system_clock::SystemClock;
