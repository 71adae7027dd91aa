pub mod api;
pub mod bulk;
pub mod ui;
