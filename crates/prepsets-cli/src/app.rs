use anyhow::{Context, Result};
use clap::Args;
use prepsets_application::SessionController;
use prepsets_core::session::SessionSettings;
use prepsets_infrastructure::{AppConfig, ConfigService, DirTopicSource, JsonFileStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing set1.json, set2.json, ...
    #[arg(long, global = true, value_name = "DIR")]
    pub sets_dir: Option<PathBuf>,

    /// Where the session state is persisted
    #[arg(long, global = true, value_name = "FILE")]
    pub state_file: Option<PathBuf>,
}

impl GlobalArgs {
    /// Loads the config file and applies the command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let service = match &self.config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let mut config = service
            .load()
            .with_context(|| format!("Failed to load config from {}", service.path().display()))?;

        if let Some(dir) = &self.sets_dir {
            config.sets_dir = Some(dir.clone());
        }
        if let Some(path) = &self.state_file {
            config.state_file = Some(path.clone());
        }
        Ok(config)
    }
}

/// How the session paces its loading indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Interactive browsing: configured load and page-transition delays.
    Interactive,
    /// One-shot commands: no artificial delays.
    Immediate,
}

/// Wires configuration, storage and topic source into a controller.
pub struct AppBootstrap {
    pub config: AppConfig,
    pub controller: SessionController,
}

impl AppBootstrap {
    pub fn new(args: &GlobalArgs, pacing: Pacing) -> Result<Self> {
        let config = args.resolve_config()?;
        let sets_dir = config.resolve_sets_dir()?;
        let state_file = config.resolve_state_file()?;

        tracing::debug!("Sets directory: {:?}", sets_dir);
        tracing::debug!("State file: {:?}", state_file);

        let store = JsonFileStore::open(&state_file)
            .with_context(|| format!("Failed to open state file {}", state_file.display()))?;
        let source = DirTopicSource::new(sets_dir);

        let controller = SessionController::new(
            Arc::new(source),
            Arc::new(store),
            session_settings(&config, pacing),
        );
        Ok(Self { config, controller })
    }

    /// Hydrates the session and loads the restored topic.
    pub async fn start(args: &GlobalArgs, pacing: Pacing) -> Result<Self> {
        let app = Self::new(args, pacing)?;
        let report = app.controller.start().await;
        for key in &report.discarded {
            tracing::warn!("Stored '{}' was unreadable and has been reset", key.storage_key());
        }
        Ok(app)
    }
}

fn session_settings(config: &AppConfig, pacing: Pacing) -> SessionSettings {
    let settings = config.session_settings();
    match pacing {
        Pacing::Interactive => settings,
        Pacing::Immediate => SessionSettings {
            min_load_delay: Duration::ZERO,
            page_transition_delay: Duration::ZERO,
            ..settings
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "page_size = 3\nsets_dir = \"/from/file\"\nstate_file = \"/from/file/state.json\"\n",
        )
        .unwrap();

        let args = GlobalArgs {
            config: Some(config_path),
            sets_dir: Some(PathBuf::from("/from/flag")),
            state_file: None,
        };
        let config = args.resolve_config().unwrap();

        assert_eq!(config.page_size, 3);
        assert_eq!(config.sets_dir, Some(PathBuf::from("/from/flag")));
        assert_eq!(config.state_file, Some(PathBuf::from("/from/file/state.json")));
    }

    #[test]
    fn test_immediate_pacing_drops_delays() {
        let config = AppConfig::default();
        let settings = session_settings(&config, Pacing::Immediate);
        assert_eq!(settings.min_load_delay, Duration::ZERO);
        assert_eq!(settings.page_transition_delay, Duration::ZERO);
        assert_eq!(settings.page_size, config.page_size);

        let settings = session_settings(&config, Pacing::Interactive);
        assert_eq!(settings.min_load_delay, Duration::from_millis(800));
    }
}
