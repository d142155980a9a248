use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-Agent the game client sends to FastDL servers.
pub const DEFAULT_USER_AGENT: &str = "Valve/Steam HTTP Client 1.0 (70)";

/// Global configuration loaded from `~/.config/fastdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastdlConfig {
    /// User-Agent header sent with every GET.
    pub user_agent: String,
    /// Number of workers used for one map's resources (1 = strictly sequential).
    pub jobs: usize,
    /// Follow HTTP redirects issued by the FastDL server.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
}

fn default_follow_redirects() -> bool {
    true
}

impl Default for FastdlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            jobs: 1,
            follow_redirects: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fastdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FastdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FastdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FastdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FastdlConfig::default();
        assert_eq!(cfg.user_agent, "Valve/Steam HTTP Client 1.0 (70)");
        assert_eq!(cfg.jobs, 1);
        assert!(cfg.follow_redirects);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FastdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FastdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.jobs, cfg.jobs);
        assert_eq!(parsed.follow_redirects, cfg.follow_redirects);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            user_agent = "fastdl-test/1.0"
            jobs = 4
        "#;
        let cfg: FastdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.user_agent, "fastdl-test/1.0");
        assert_eq!(cfg.jobs, 4);
        assert!(cfg.follow_redirects);
    }

    #[test]
    fn config_toml_disable_redirects() {
        let toml = r#"
            user_agent = "x"
            jobs = 1
            follow_redirects = false
        "#;
        let cfg: FastdlConfig = toml::from_str(toml).unwrap();
        assert!(!cfg.follow_redirects);
    }
}
