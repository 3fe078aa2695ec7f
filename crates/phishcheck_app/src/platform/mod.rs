//! Terminal shell: wires the pure core to the client worker and the result page.
mod app;
pub mod cli;
mod config;
mod effects;
mod export;
mod logging;
mod ui;

pub use app::run;
