/*!

This library provides the Kubernetes object definitions of the podloxx agent and the provisioner
that puts them into a cluster.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use config::{DeployConfig, DEFAULT_API_TIMEOUT};
pub use provisioner::Provisioner;

pub mod clients;
mod config;
pub mod constants;
pub mod provisioner;
pub mod system;
