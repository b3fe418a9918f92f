pub mod accelerator;
pub mod config;
pub mod record;
pub mod sync;
pub mod table;
