use crate::error::{AppResult, ConfigErrorKind, PanelError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,              // e.g. 80
    pub color: bool,               // false for dumb terminals / pipes
    pub theme_path: Option<PathBuf>, // e.g. "themes/dark.toml"
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 80,
            color: true,
            theme_path: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| PanelError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Read(e),
        })?;
        let cfg: Self = toml::from_str(&data).map_err(|e| PanelError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Parse(e),
        })?;
        Ok(cfg)
    }

    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::from_filename(".env");
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut cfg = Self::default();
        if let Some(v) = get("ROOMPANEL_WIDTH") {
            cfg.width = v
                .trim()
                .parse()
                .map_err(|_| PanelError::InvalidEnv("ROOMPANEL_WIDTH".to_string(), v.clone()))?;
        }
        if let Some(v) = get("ROOMPANEL_COLOR") {
            cfg.color = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(PanelError::InvalidEnv("ROOMPANEL_COLOR".to_string(), v)),
            };
        }
        cfg.theme_path = get("ROOMPANEL_THEME").filter(|v| !v.is_empty()).map(PathBuf::from);
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(cfg.width, 80);
        assert!(cfg.color);
        assert!(cfg.theme_path.is_none());
    }

    #[test]
    fn env_overrides() {
        let cfg = Config::from_vars(vars(&[
            ("ROOMPANEL_WIDTH", "100"),
            ("ROOMPANEL_COLOR", "off"),
            ("ROOMPANEL_THEME", "dark.toml"),
        ]))
        .unwrap();
        assert_eq!(cfg.width, 100);
        assert!(!cfg.color);
        assert_eq!(cfg.theme_path, Some(PathBuf::from("dark.toml")));
    }

    #[test]
    fn invalid_env_is_reported() {
        let err = Config::from_vars(vars(&[("ROOMPANEL_WIDTH", "wide")])).unwrap_err();
        assert!(matches!(err, PanelError::InvalidEnv(k, _) if k == "ROOMPANEL_WIDTH"));
    }

    #[test]
    fn toml_fields_are_optional() {
        let cfg: Config = toml::from_str("width = 60").unwrap();
        assert_eq!(cfg.width, 60);
        assert!(cfg.color);
    }
}
