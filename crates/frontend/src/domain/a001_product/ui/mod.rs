pub mod bulk_bar;
pub mod import;
pub mod list;
