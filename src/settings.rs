//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs/settings.toml (or platform equivalent)

use crate::board::Action;
use crate::mode::GameMode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Driver settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub display: DisplaySettings,
    /// Input tokens
    pub keys: KeyBindings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Fixed bag seed; a fresh random one each game when unset
    pub seed: Option<u64>,
    /// `marathon`, `sprint` (40 lines) or `ultra` (2 minutes)
    pub mode: GameMode,
}

/// How the text driver prints the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Ghost piece visibility
    pub show_ghost: bool,
    /// Also print the 6 spawn rows above the playfield
    pub show_hidden_rows: bool,
    /// How many upcoming pieces to list
    pub preview: usize,
    pub format: OutputFormat,
}

/// Input tokens (stored as strings for easy editing)
/// Each action can have one or more tokens bound to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate_cw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate_ccw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hold: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// What a line of input means to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Action),
    Quit,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive; `RUST_LOG` still wins
    pub filter: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            show_hidden_rows: false,
            preview: 5,
            format: OutputFormat::Text,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let token = |action: Action| vec![action.token().to_string()];
        Self {
            move_left: token(Action::MoveLeft),
            move_right: token(Action::MoveRight),
            soft_drop: token(Action::SoftDrop),
            hard_drop: token(Action::HardDrop),
            rotate_cw: token(Action::RotateCW),
            rotate_ccw: token(Action::RotateCCW),
            hold: token(Action::Hold),
            quit: vec!["q".to_string(), "quit".to_string()],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "tetrs_engine=debug".to_string(),
        }
    }
}

impl KeyBindings {
    /// Look up a trimmed input line. Tokens are case-sensitive.
    pub fn command(&self, input: &str) -> Option<Command> {
        let bound = |keys: &[String]| keys.iter().any(|k| k == input);

        if bound(self.quit.as_slice()) {
            return Some(Command::Quit);
        }
        let action = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.soft_drop, Action::SoftDrop),
            (&self.hard_drop, Action::HardDrop),
            (&self.rotate_cw, Action::RotateCW),
            (&self.rotate_ccw, Action::RotateCCW),
            (&self.hold, Action::Hold),
        ]
        .into_iter()
        .find(|(keys, _)| bound(keys.as_slice()))
        .map(|(_, action)| action)?;
        Some(Command::Play(action))
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), SettingsError> {
        let dir = Self::config_dir().ok_or(SettingsError::NoConfigDir)?;

        // Create directory if needed
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("settings.toml"), self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert_eq!(Settings::parse(&text).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = Settings::parse(
            r#"
            [game]
            seed = 42
            mode = "sprint"

            [display]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(settings.game.seed, Some(42));
        assert_eq!(settings.game.mode, GameMode::Sprint);
        assert_eq!(settings.display.format, OutputFormat::Json);
        assert_eq!(settings.display.preview, 5);
        assert_eq!(settings.keys, KeyBindings::default());
    }

    #[test]
    fn test_key_string_or_list() {
        let settings = Settings::parse(
            r#"
            [keys]
            move_left = ["l", "a"]
            hard_drop = " "
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.move_left, vec!["l", "a"]);
        assert_eq!(settings.keys.hard_drop, vec![" "]);
        assert_eq!(settings.keys.command("a"), Some(Command::Play(Action::MoveLeft)));
        assert_eq!(settings.keys.command("hd"), None);
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let keys = KeyBindings::default();
        for action in Action::ALL {
            assert_eq!(keys.command(action.token()), Some(Command::Play(action)));
        }
        assert_eq!(keys.command("q"), Some(Command::Quit));
        assert_eq!(keys.command("jump"), None);
    }

    #[test]
    fn test_rejects_bad_format() {
        assert!(Settings::parse("[display]\nformat = \"xml\"").is_err());
        assert!(Settings::parse("[game]\nmode = \"zen\"").is_err());
    }

    #[test]
    fn test_mode_defaults_to_marathon() {
        assert_eq!(Settings::default().game.mode, GameMode::Marathon);
        let settings = Settings::parse("[game]\nmode = \"ultra\"").unwrap();
        assert_eq!(settings.game.mode, GameMode::Ultra);
    }
}
