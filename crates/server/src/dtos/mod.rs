pub mod query;
pub mod response;
