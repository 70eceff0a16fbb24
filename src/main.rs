use std::env;
use chrono::Local;
use tracing_subscriber::EnvFilter;
use search_parse::config::ServerConfig;
use search_parse::{search_terms, stemmer, web_server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    // Перевіряємо аргументи командного рядка
    match args.get(1).map(String::as_str) {
        Some("web") => start_web_mode(args.get(2).map(String::as_str)).await,
        Some("stem") => stem_mode(&args[2..]),
        Some(_) => start_cli_mode(&args[1..]),
        None => print_usage(),
    }
}

fn load_config(path_arg: Option<&str>) -> Option<ServerConfig> {
    let config_path = ServerConfig::resolve_path(path_arg);
    println!("🔍 Конфігурація: {}", config_path);

    match ServerConfig::load_or_default(&config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("❌ {}", e);
            None
        }
    }
}

async fn start_web_mode(config_path: Option<&str>) {
    println!("🔥 Search Parse - Web Mode");
    println!("=========================");

    let Some(config) = load_config(config_path) else {
        return;
    };

    let time_str = Local::now().format("%H:%M:%S").to_string();
    println!("🚀 [{time_str}] Стоп-фраз: {}, стемінг: {}, мін. символів: {}",
        search_parse::StopSpec::parse(&config.stop_words).len(),
        if config.options.stemmer { "так" } else { "ні" },
        config.options.min_chars,
    );

    // Запуск веб-сервера
    if let Err(e) = web_server::start_web_server(config).await {
        eprintln!("❌ Помилка запуску сервера: {}", e);
    }
}

fn start_cli_mode(words: &[String]) {
    let Some(config) = load_config(None) else {
        return;
    };

    let query = words.join(" ");
    let terms = search_terms(&query, &config.stop_words, &config.options);

    if terms.is_empty() {
        println!("ℹ️ Після обробки запиту не залишилось слів");
    } else {
        println!("✅ {}", terms.join(" "));
    }
}

fn stem_mode(words: &[String]) {
    for word in words {
        let normalized = word.to_lowercase().replace('ё', "е");
        println!("{} → {}", word, stemmer::stem_word(&normalized));
    }
}

fn print_usage() {
    println!("🔥 Search Parse");
    println!();
    println!("Використання:");
    println!("  search_parse web [config.json]   Запуск веб-сервера");
    println!("  search_parse stem <слова..>      Основи слів");
    println!("  search_parse <запит..>           Обробка пошукового запиту");
}
