pub use error::{Error, Result};
pub use manager::Provisioner;

mod error;
mod install;
mod manager;
