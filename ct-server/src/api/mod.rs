pub mod concerts;
pub mod error;
pub mod extractors;
pub mod response;
pub mod users;
