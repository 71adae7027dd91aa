pub mod ajax;
pub mod error;
