use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, sync::OnceLock};

pub const CONFIG_PATH: &str = "Config.toml";
pub const TOKEN_ENV: &str = "FREIGHTBOOK_TOKEN";

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn init_if_not() -> Result<bool> {
    init_at(CONFIG_PATH)
}

/// Создаёт файл конфигурации со значениями по умолчанию, если его нет
pub fn init_at(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if fs::metadata(path).is_ok() {
        return Ok(false);
    }
    fs::write(path, DEFAULT_CONFIG_STR.as_bytes())?;
    Ok(true)
}

pub fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let buf = fs::read(path)?;
    Ok(toml::from_slice::<Config>(&buf)?)
}

/// Конфигурация из `Config.toml`, читается один раз
pub fn get() -> Result<&'static Config> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = load_from(CONFIG_PATH)?;
    Ok(CONFIG.get_or_init(|| config))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: Api,
    pub schedule: Schedule,
    pub launch_options: LaunchOptions,
    pub logging: Logging,
}

impl Config {
    /// Токен из переменной окружения важнее токена из файла
    pub fn api_token(&self) -> String {
        token_override(env::var(TOKEN_ENV).ok(), &self.api.token)
    }
}

fn token_override(from_env: Option<String>, from_file: &str) -> String {
    from_env
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| from_file.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Api {
    pub domain: String,
    pub token: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            domain: "http://localhost:8080".to_string(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub cargo_type: String,
    pub default_weight: f64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            cargo_type: "DRY".to_string(),
            default_weight: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchOptions {
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub filter: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

const DEFAULT_CONFIG_STR: &str = r##"
# Параметры бэкенда
[api]
domain = "http://localhost:8080" # Базовый адрес API без завершающего слэша
token = "" # Bearer-токен. Переменная окружения FREIGHTBOOK_TOKEN имеет приоритет

# Параметры запроса расписаний
[schedule]
cargo_type = "DRY" # Тип груза для сервиса расписаний
default_weight = 100.0 # Вес, если в заявке не указан grossWeight

# Параметры запуска
[launch_options]
verbose = false # Вывод полных документов в консоль (true/false)

# Логирование
[logging]
filter = "info" # Фильтр tracing (переменная RUST_LOG имеет приоритет)
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_is_written_once_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);

        assert!(init_at(&path).unwrap());
        assert!(!init_at(&path).unwrap());

        let config = load_from(&path).unwrap();
        assert_eq!(config.api.domain, "http://localhost:8080");
        assert_eq!(config.schedule.cargo_type, "DRY");
        assert_eq!(config.schedule.default_weight, 100.0);
        assert!(!config.launch_options.verbose);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "[api]\ndomain = \"https://api.example.com\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.api.domain, "https://api.example.com");
        assert_eq!(config.api.token, "");
        assert_eq!(config.schedule.default_weight, 100.0);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[api\n").unwrap();

        assert!(matches!(
            load_from(&path),
            Err(crate::error::Error::TomlDe(_))
        ));
        assert!(matches!(
            load_from(dir.path().join("absent.toml")),
            Err(crate::error::Error::StdIo(_))
        ));
    }

    #[test]
    fn env_token_wins_when_not_blank() {
        assert_eq!(token_override(Some("env".into()), "file"), "env");
        assert_eq!(token_override(Some("  ".into()), "file"), "file");
        assert_eq!(token_override(None, "file"), "file");
    }
}
