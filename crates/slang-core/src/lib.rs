pub mod audio;
pub mod config;
pub mod dictionary;
pub mod entry;
pub mod favorites;
pub mod filter;
pub mod kv;
pub mod pagination;
pub mod platform;
pub mod store;
pub mod submission;
