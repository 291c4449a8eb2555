use crate::error::{Result, StudydeskError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_student_id")]
    pub student_id: String,
}

fn default_student_id() -> String {
    "me".to_string()
}

/// Bearer token for the platform session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: SessionToken,
    pub stored_at: DateTime<Utc>,
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studydesk")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    pub fn session_path() -> PathBuf {
        Self::config_dir().join("session.json")
    }

    pub fn load() -> Result<Option<Config>> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)?;
        if config.base_url.trim().is_empty() {
            return Err(StudydeskError::Config(format!(
                "base_url missing in {}",
                path.display()
            )));
        }
        Ok(Some(config))
    }

    pub fn ensure_config_dir() -> Result<()> {
        let dir = Self::config_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

pub fn save_session(session: &SessionToken) -> Result<()> {
    Config::ensure_config_dir()?;
    let path = Config::session_path();

    let stored = StoredSession {
        session: session.clone(),
        stored_at: Utc::now(),
    };

    let json = serde_json::to_string_pretty(&stored)?;
    fs::write(&path, &json)?;

    // Set restrictive permissions on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

pub fn load_session() -> Result<Option<SessionToken>> {
    let path = Config::session_path();
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let stored: StoredSession = serde_json::from_str(&content)?;
    Ok(Some(stored.session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            base_url: "https://learn.example.com/api".to_string(),
            student_id: "s-123".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(back.base_url, config.base_url);
        assert_eq!(back.student_id, config.student_id);
    }

    #[test]
    fn test_student_id_defaults_to_me() {
        let config: Config =
            serde_json::from_str(r#"{"base_url":"https://learn.example.com"}"#).unwrap();
        assert_eq!(config.student_id, "me");
    }
}
