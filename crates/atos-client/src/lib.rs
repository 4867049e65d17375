//! Client side of the atos API: the reqwest HTTP client and the record
//! submission form built on top of it.

pub mod form;
pub mod http;

#[cfg(test)]
mod test_support;

pub use form::{AtosApi, FormState, RecordForm, SubmitError, Submitted};
pub use http::{AtosClient, ClientError};
