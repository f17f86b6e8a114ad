pub mod error;
pub mod form;
pub mod outcome;
pub mod semester;
pub mod term;

pub use error::ValidationError;
