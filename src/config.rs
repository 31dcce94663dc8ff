use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

/// Registry page-size ceiling. Also the default page size.
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DOCKER_HUB_API_ROOT: &str = "https://hub.docker.com/v2/";
pub const DOCKER_HUB_AUTH_URL: &str = "https://auth.docker.io/token";
pub const DOCKER_HUB_SERVICE: &str = "registry.docker.io";
pub const DOCKER_HUB_REGISTRY: &str = "https://registry-1.docker.io";

const fn default_timeout() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Configuration {
    /// Catalog API root, with trailing slash. `repositories/{owner}` is appended.
    pub catalog_root: String,
    /// Token issuance endpoint.
    pub auth_url: String,
    /// `service` parameter sent with every token request.
    pub service: String,
    /// Distribution API base, without trailing slash.
    pub registry_url: String,
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            catalog_root: DOCKER_HUB_API_ROOT.into(),
            auth_url: DOCKER_HUB_AUTH_URL.into(),
            service: DOCKER_HUB_SERVICE.into(),
            registry_url: DOCKER_HUB_REGISTRY.into(),
            user_agent: concat!("hubcat/", env!("CARGO_PKG_VERSION")).into(),
            timeout: default_timeout(),
        }
    }
}

impl Configuration {
    pub fn figment(configs: Vec<PathBuf>) -> Figment {
        let fig = Figment::from(Serialized::defaults(Configuration::default()));

        let fig = match AppDirs::new(Some("hubcat"), true) {
            Some(app_dirs) => {
                let config_path = app_dirs.config_dir.join("config.yaml");
                match config_path.exists() {
                    true => fig.admerge(Yaml::file(config_path)),
                    false => fig,
                }
            }
            None => fig,
        };

        let fig = configs
            .into_iter()
            .fold(fig, |fig, config_path| fig.admerge(Yaml::file(config_path)));

        fig.admerge(Env::prefixed("HUBCAT_"))
    }

    pub fn config(figment: Figment) -> Result<Configuration> {
        let mut config: Configuration =
            figment.extract().context("Failed to load configuration")?;

        if !config.catalog_root.ends_with('/') {
            config.catalog_root.push('/');
        }

        while config.registry_url.ends_with('/') {
            config.registry_url.pop();
        }

        if config.timeout == 0 {
            bail!("timeout must be at least 1 second");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let defaults = Configuration::default();
        assert_eq!(defaults.catalog_root, "https://hub.docker.com/v2/");
        assert_eq!(defaults.auth_url, "https://auth.docker.io/token");
        assert_eq!(defaults.service, "registry.docker.io");
        assert_eq!(defaults.registry_url, "https://registry-1.docker.io");
        assert!(defaults.user_agent.starts_with("hubcat/"));
    }

    #[test]
    fn file_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                catalog_root: "http://localhost:8080/v2"
                registry_url: "http://localhost:5000/"
                timeout: 5
                "#,
            )?;
            jail.set_env("HUBCAT_SERVICE", "registry.example.com");

            let config = Configuration::config(Configuration::figment(vec![
                jail.directory().join("config.yaml"),
            ]))
            .expect("Configuration should be loadable");

            assert_eq!(config.catalog_root, "http://localhost:8080/v2/");
            assert_eq!(config.registry_url, "http://localhost:5000");
            assert_eq!(config.service, "registry.example.com");
            assert_eq!(config.auth_url, DOCKER_HUB_AUTH_URL);
            assert_eq!(config.timeout, 5);

            Ok(())
        });
    }

    #[test]
    fn zero_timeout_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HUBCAT_TIMEOUT", "0");

            assert!(Configuration::config(Configuration::figment(vec![])).is_err());

            Ok(())
        });
    }
}
