pub mod handlers;
pub mod placeholder;
pub mod report;
pub mod store;
pub mod survey;
