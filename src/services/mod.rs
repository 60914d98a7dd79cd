pub mod data_stores;
pub mod user_directory;
