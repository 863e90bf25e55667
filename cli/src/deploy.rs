use crate::config::ConfigArgs;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use podloxx_model::Provisioner;
use std::path::PathBuf;
use std::time::Duration;

/// The deploy subcommand is responsible for putting all of the podloxx components in a k8s
/// cluster. Running it again updates the workloads in place.
#[derive(Debug, Parser)]
pub(crate) struct Deploy {
    #[clap(flatten)]
    config: ConfigArgs,

    /// Seconds to wait for each Kubernetes API call before giving up.
    #[clap(long = "api-timeout-secs", default_value = "30")]
    api_timeout_secs: u64,
}

impl Deploy {
    pub(crate) async fn run(self, kubeconfig: Option<PathBuf>) -> Result<()> {
        let config = self
            .config
            .into_deploy_config(Duration::from_secs(self.api_timeout_secs));
        let provisioner = match kubeconfig {
            Some(path) => Provisioner::new_from_kubeconfig_path(&path, config)
                .await
                .context(format!(
                    "Unable to create podloxx provisioner from path '{:?}'",
                    path
                ))?,
            None => Provisioner::new(config)
                .await
                .context("Unable to create default podloxx provisioner")?,
        };

        info!(
            "Deploying podloxx to namespace '{}'",
            provisioner.config().namespace
        );
        provisioner.deploy().await.context(
            "Unable to deploy podloxx to the cluster. (Some objects may be left behind)",
        )?;

        println!("podloxx components were successfully deployed.");

        Ok(())
    }
}
