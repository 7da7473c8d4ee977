pub mod builder;
pub mod data;
pub mod handlers;
pub mod render;
pub mod store;
