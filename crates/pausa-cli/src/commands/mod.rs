pub mod config;
pub mod history;
pub mod preset;
pub mod run;
pub mod stats;
