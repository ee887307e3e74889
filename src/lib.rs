rust_i18n::i18n!("locales", fallback = "en");

pub mod data;
pub mod models;
pub mod names;
pub mod quiz;
pub mod rejections;
pub mod server;
pub mod utils;
pub mod views;
