// ABOUTME: Bridge module - runs the BoltzPay CLI as a subprocess.
// ABOUTME: Config, launcher lookup, process running and envelope parsing.

mod client;
mod config;
mod envelope;
mod locator;
mod runner;

pub use client::*;
pub use config::*;
pub use envelope::*;
pub use locator::*;
pub use runner::*;
