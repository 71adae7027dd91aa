pub mod api_utils;
pub mod components;
pub mod config;
pub mod csv_importer;
pub mod icons;
pub mod modal;
pub mod notification;
pub mod selection;
