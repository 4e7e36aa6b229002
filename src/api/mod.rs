//! Remote post service: the CRUD contract the store consumes and its HTTP
//! implementation.

mod error;
mod http;
mod service;

pub use error::ApiError;
pub use http::HttpPostService;
pub use service::PostService;
