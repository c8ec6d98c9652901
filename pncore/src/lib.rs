pub mod device;
pub mod error;
pub mod field;
pub mod form;
pub mod hexdecimal;
pub mod platform;
pub mod schema;
pub mod validator;
