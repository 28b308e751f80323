/**
 * Adapters between protected `http` messages and the body
 *  types of client and server libraries.
 * The protection engine works on fully buffered
 *  `Request<Bytes>` / `Response<Bytes>` values. These
 *  adapters lift a protected message into a library's native
 *  body type for sending, and collect a received native
 *  message back into bytes for verification.
 */
pub mod axum;
/**
 * Adapter errors
 */
pub mod error;
/**
 * Client side adapter for `reqwest`
 */
pub mod reqwest;

pub mod prelude {
    pub use crate::axum::AxumAdapter;
    pub use crate::error::AdapterError;
    pub use crate::reqwest::ReqwestAdapter;
    pub use common::prelude::Adapter;
}
