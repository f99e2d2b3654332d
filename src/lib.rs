// ABOUTME: Root module for boltzpay-tools - paid-API agent tools over the BoltzPay CLI.
// ABOUTME: Re-exports the bridge, the tool capability, and the seven tools.

pub mod bridge;
pub mod error;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use error::{BridgeError, Error};
