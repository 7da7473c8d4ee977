pub mod definition;
pub mod handlers;
pub mod store;
