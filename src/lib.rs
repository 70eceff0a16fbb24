pub mod config;
pub mod query_cache;
pub mod stemmer;
pub mod stopwords;
pub mod term_selector;
pub mod tokenizer;
pub mod web_server;

pub use config::{ConfigError, SearchOptions, ServerConfig};
pub use query_cache::QueryCache;
pub use stopwords::StopSpec;
pub use tokenizer::Token;

/// Готує пошуковий запит: видаляє стоп-фрази, розбиває на слова,
/// виконує стемінг і повертає до `max_terms` унікальних слів
pub fn search_terms(raw_text: &str, stop_spec: &str, options: &SearchOptions) -> Vec<String> {
    // Без списку стоп-фраз запит вважається недійсним
    if raw_text.is_empty() || stop_spec.is_empty() {
        return Vec::new();
    }

    let text = if options.strip_punctuation {
        stopwords::strip_punctuation(raw_text)
    } else {
        raw_text.to_string()
    };

    let filtered = StopSpec::parse(stop_spec).erase(&text);
    let tokens = tokenizer::tokenize(&filtered);
    if tokens.is_empty() {
        return Vec::new();
    }

    let terms = term_selector::select_terms(&tokens, options);
    tracing::debug!("Запит {:?}: {} токенів, відібрано {:?}", raw_text, tokens.len(), terms);
    terms
}

/// Те саме, що й `search_terms`, але повертає слова одним рядком через пробіл
pub fn normalize_search_with(raw_text: &str, stop_spec: &str, options: &SearchOptions) -> String {
    search_terms(raw_text, stop_spec, options).join(" ")
}

/// Обробка запиту з прямими параметрами.
/// Прийменники тут завжди видаляються (`strip_pretext = true`), а розділові знаки
/// не чіпаються; щоб змінити це, використовуйте `normalize_search_with` з власними `SearchOptions`
pub fn normalize_search(
    raw_text: &str,
    stop_spec: &str,
    min_chars: usize,
    stemmer_enabled: bool,
    cap_enabled: bool,
) -> String {
    let options = SearchOptions::new(min_chars, stemmer_enabled, cap_enabled);
    normalize_search_with(raw_text, stop_spec, &options)
}
