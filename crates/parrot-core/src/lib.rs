//! Types shared by every Parrot crate

mod context;
mod error;

pub use context::RequestContext;
pub use error::HttpError;
