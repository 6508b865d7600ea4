//! Request extractors shared by the catalog handlers.

pub mod request_data;

pub use request_data::RequestData;
