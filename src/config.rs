// ============================================================================
// Module : config
// ============================================================================
// Configuration utilisateur (JSON), optionnelle
//
// Emplacement :
// - $TRADEDECK_CONFIG si défini
// - sinon <config_dir>/tradedeck/config.json
//   (Linux : ~/.config/tradedeck/config.json)
//
// Fichier absent : valeurs par défaut. Fichier illisible ou invalide : erreur.
// Le thème et la langue ne sont volontairement pas dans la config.
// ============================================================================

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::orderbook::DEFAULT_DEPTH_SCALE;

/// Variable d'environnement qui remplace le chemin de la config
pub const CONFIG_ENV: &str = "TRADEDECK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Session côté client : simple drapeau, aucune authentification réelle
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub logged_in: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { logged_in: true }
    }
}

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Délai de poll des événements clavier (ms)
    pub tick_rate_ms: u64,

    /// Répertoire des logs (sinon répertoire de données de l'utilisateur)
    pub log_dir: Option<PathBuf>,

    pub session: SessionConfig,

    /// Cumul correspondant à une barre de profondeur pleine
    pub depth_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            log_dir: None,
            session: SessionConfig::default(),
            depth_scale: DEFAULT_DEPTH_SCALE,
        }
    }
}

impl Config {
    /// Chemin de config par défaut (variable d'env prioritaire)
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("tradedeck").join("config.json"))
    }

    /// Charge la config depuis l'emplacement par défaut
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Charge la config depuis un fichier ; absent = valeurs par défaut
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(?path, "Config loaded");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Répertoire des logs effectif
    ///
    /// Ordre : config, puis <data_local_dir>/tradedeck/logs, puis ./logs
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("tradedeck").join("logs")))
            .unwrap_or_else(|| PathBuf::from("./logs"))
    }
}
