pub mod analyze;
pub mod catalog;
pub mod classify;
pub mod dispatch;
pub mod extract;
pub mod input;
pub mod schema;
