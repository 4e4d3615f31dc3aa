//! Contact form endpoint module.
//!
//! Posts form fields to the URL named by the form's action and maps the
//! reply to success or a [`SubmitError`].

mod client;
mod error;

pub use client::Client;
pub use error::SubmitError;
