use crate::config::ConfigArgs;
use anyhow::{Context, Result};
use clap::Parser;
use podloxx_model::{system, DEFAULT_API_TIMEOUT};

/// Print the podloxx objects as a multi-document YAML stream, e.g. to review them or to pipe them
/// into `kubectl apply -f -`.
#[derive(Debug, Parser)]
pub(crate) struct Manifest {
    #[clap(flatten)]
    config: ConfigArgs,
}

impl Manifest {
    pub(crate) fn run(self) -> Result<()> {
        let config = self.config.into_deploy_config(DEFAULT_API_TIMEOUT);
        let yaml = system::manifest(&config).context("Unable to render the podloxx manifest")?;
        print!("{}", yaml);
        Ok(())
    }
}
