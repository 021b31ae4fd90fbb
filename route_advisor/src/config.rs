use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use indexmap::IndexMap;
use ptfs_feed::{NestedRouteTable, RoutePair};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApplicationError, ApplicationResult};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

pub(crate) fn route_advisor_project_dir() -> Option<ProjectDirs> {
    ProjectDirs::from("", "meltinglava", "route_advisor")
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AdvisorConfig {
    pub stream_url: String,
    pub atis_url: String,
    pub routes_file: PathBuf,
    pub reconnect_delay_secs: u64,
    pub routing_enabled: bool,
    pub flight_plan_marker: String,
    pub route_pairs: Vec<RoutePair>,
    #[serde(default)]
    pub airport_names: IndexMap<String, String>,
}

impl AdvisorConfig {
    /// Loads `config_file` if given, otherwise the config file in the user
    /// config folder, which is created from the defaults when missing.
    /// `ROUTE_ADVISOR_*` environment variables override both.
    pub fn load(config_file: Option<&Path>, clean_config: bool) -> ApplicationResult<Self> {
        let path = match config_file {
            Some(path) => path.to_path_buf(),
            None => user_config_file(clean_config)?,
        };
        debug!(?path, "Reading configuration");
        let builder = Config::builder().add_source(File::from(path).required(true));
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ApplicationResult<Self> {
        let mut config = builder
            .add_source(Environment::with_prefix("ROUTE_ADVISOR").try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;
        config.airport_names = config
            .airport_names
            .into_iter()
            .map(|(icao, name)| (icao.to_ascii_uppercase(), name))
            .collect();
        Ok(config)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    pub fn load_routes(&self) -> ApplicationResult<NestedRouteTable> {
        let raw = fs::read_to_string(&self.routes_file)?;
        Ok(NestedRouteTable::from_json(&raw)?)
    }
}

fn user_config_file(clean_config: bool) -> ApplicationResult<PathBuf> {
    let config_dir = route_advisor_project_dir()
        .ok_or(ApplicationError::NoConfigFolder)?
        .config_dir()
        .to_path_buf();
    let config_file = config_dir.join("config.toml");
    if clean_config || !config_file.exists() {
        fs::create_dir_all(&config_dir)?;
        fs::write(&config_file, DEFAULT_CONFIG)?;
        info!(?config_file, "Wrote default configuration");
    }
    Ok(config_file)
}
