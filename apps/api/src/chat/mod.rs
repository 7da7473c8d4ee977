pub mod fallback;
pub mod handlers;
