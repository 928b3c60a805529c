//! Helper functions shared by templates, the server and the generator

mod url;

pub use url::*;
