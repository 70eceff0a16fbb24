use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Шлях до конфігурації за замовчуванням
pub const DEFAULT_CONFIG_PATH: &str = "search_parse.json";

/// Змінна оточення, що перевизначає шлях до конфігурації
pub const CONFIG_PATH_ENV: &str = "SEARCH_PARSE_CONFIG";

/// Максимальна кількість слів у запиті
pub const DEFAULT_MAX_TERMS: usize = 9;

/// Прийменники, які не несуть змісту для пошуку
pub const DEFAULT_PRETEXT_WORDS: &[&str] = &["и", "для", "в", "на", "под", "из", "с", "по"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Помилка читання конфігурації: {0}")]
    Io(#[from] std::io::Error),

    #[error("Помилка парсингу JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Налаштування обробки пошукового запиту
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchOptions {
    /// Мінімальна кількість символів у слові (0 означає без обмеження)
    pub min_chars: usize,
    /// Увімкнути стемінг
    pub stemmer: bool,
    /// Обмежити кількість слів значенням `max_terms`
    pub cap: bool,
    pub max_terms: usize,
    /// Видаляти прийменники зі слів перед стемінгом
    pub strip_pretext: bool,
    pub pretext_words: Vec<String>,
    /// Замінювати розділові знаки пробілами перед фільтрацією стоп-фраз
    pub strip_punctuation: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_chars: 3,
            stemmer: true,
            cap: true,
            max_terms: DEFAULT_MAX_TERMS,
            strip_pretext: true,
            pretext_words: DEFAULT_PRETEXT_WORDS.iter().map(|w| w.to_string()).collect(),
            strip_punctuation: false,
        }
    }
}

impl SearchOptions {
    pub fn new(min_chars: usize, stemmer: bool, cap: bool) -> Self {
        Self {
            min_chars,
            stemmer,
            cap,
            ..Self::default()
        }
    }
}

/// Конфігурація сервера
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Стоп-фрази, розділені комою, пробілом або новим рядком
    pub stop_words: String,
    pub cache_capacity: usize,
    pub options: SearchOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            stop_words: String::new(),
            cache_capacity: 1000,
            options: SearchOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Завантажує конфігурацію; якщо файлу немає, повертає значення за замовчуванням
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("Файл конфігурації {} не знайдено, використовуємо значення за замовчуванням", path);
            Ok(Self::default())
        }
    }

    /// Шлях з аргументу, змінної оточення або за замовчуванням
    pub fn resolve_path(arg: Option<&str>) -> String {
        arg.map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }
}
