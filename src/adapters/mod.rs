// Adapters layer: concrete implementations for the outside world (http, pdf, filesystem).

pub mod http;
pub mod pdf;
pub mod source;
pub mod storage;
