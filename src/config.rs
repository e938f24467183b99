use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::Player;

/// Presentation settings for one player.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerStyle {
    pub name: String,
    /// Display colour as a `#RRGGBB` string; interpreting it is the
    /// front-end's job.
    pub colour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub one: PlayerStyle,
    pub two: PlayerStyle,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            one: PlayerStyle {
                name: "Player One".to_string(),
                colour: "#D0021B".to_string(),
            },
            two: PlayerStyle {
                name: "Player Two".to_string(),
                colour: "#F8E71C".to_string(),
            },
        }
    }
}

/// Top-level application configuration, loadable from TOML.
///
/// Board geometry is fixed at compile time and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            players: PlayersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name("players.one.name", &self.players.one.name)?;
        validate_name("players.two.name", &self.players.two.name)?;
        validate_colour("players.one.colour", &self.players.one.colour)?;
        validate_colour("players.two.colour", &self.players.two.colour)?;
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }

    /// The presentation settings for `player`.
    pub fn style_of(&self, player: Player) -> &PlayerStyle {
        match player {
            Player::One => &self.players.one,
            Player::Two => &self.players.two,
        }
    }

    /// The configured display name of `player`.
    pub fn name_of(&self, player: Player) -> &str {
        &self.style_of(player).name
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn validate_colour(field: &str, value: &str) -> Result<(), ConfigError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} must be a #RRGGBB colour, got '{value}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r##"
[players.one]
name = "Alex"
colour = "#FF0000"
"##;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.players.one.name, "Alex");
        // Other fields should be defaults
        assert_eq!(config.players.two.name, "Player Two");
        assert_eq!(config.players.two.colour, "#F8E71C");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let mut config = AppConfig::default();
        config.players.one.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_malformed_colour() {
        let mut config = AppConfig::default();
        config.players.two.colour = "red".to_string();
        assert!(config.validate().is_err());

        config.players.two.colour = "#12345G".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r##"
[players.one]
name = "Sam"
colour = "#00FF00"

[players.two]
name = "Robin"
colour = "#0000FF"
"##
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.name_of(Player::One), "Sam");
        assert_eq!(config.name_of(Player::Two), "Robin");
        assert_eq!(config.style_of(Player::Two).colour, "#0000FF");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r##"
[players.one]
name = ""
colour = "#00FF00"
"##
        )
        .unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
