use crate::config::SearchOptions;
use crate::stemmer::stem_word;
use crate::tokenizer::Token;

/// Відбирає слова для пошуку: чистить, відкидає сміття, виконує стемінг,
/// прибирає дублікати та обмежує кількість
pub fn select_terms(tokens: &[Token], options: &SearchOptions) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();

    for token in tokens {
        let Some(term) = normalize_term(token, options) else {
            continue;
        };

        if options.min_chars > 0 && term.chars().count() < options.min_chars {
            continue;
        }

        if !selected.contains(&term) {
            selected.push(term);
        }
    }

    if options.cap && selected.len() > options.max_terms {
        selected.truncate(options.max_terms);
    }

    selected
}

/// Нормалізує одне слово; None, якщо слово не підходить для пошуку
fn normalize_term(token: &Token, options: &SearchOptions) -> Option<String> {
    // Для точних фраз зберігаємо пробіли на краях
    let term = match token {
        Token::ExactPhrase(text) => text.trim_matches(['"', '\'']),
        Token::Word(text) => text.trim_matches(['"', '\'', ' ']),
    };

    // Фраза з самих пробілів не є словом
    if term.trim().is_empty() || is_junk(term) {
        return None;
    }

    if !options.stemmer {
        return Some(term.to_string());
    }

    let mut term = term.to_lowercase().replace('ё', "е");

    if options.strip_pretext {
        term = remove_pretext(&term, &options.pretext_words);
    }

    if term.is_empty() {
        return None;
    }

    let stem = stem_word(&term);
    if stem.is_empty() {
        return None;
    }

    Some(stem)
}

/// Окремі латинські літери та дефіси не шукаємо
fn is_junk(term: &str) -> bool {
    let bytes = term.as_bytes();
    bytes.len() == 1 && (bytes[0].is_ascii_alphabetic() || bytes[0] == b'-')
}

/// Видаляє прийменники, що стоять окремими словами
fn remove_pretext(term: &str, pretext_words: &[String]) -> String {
    term.split(' ')
        .filter(|word| !pretext_words.iter().any(|pretext| pretext == word))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn plain(min_chars: usize, cap: bool) -> SearchOptions {
        SearchOptions::new(min_chars, false, cap)
    }

    #[test]
    fn test_junk_filter() {
        let tokens = tokenize("a - Z я ok");
        assert_eq!(select_terms(&tokens, &plain(0, false)), vec!["я", "ok"]);
    }

    #[test]
    fn test_trim_quotes() {
        let tokens = vec![
            Token::Word("'rust'".to_string()),
            Token::ExactPhrase("' foo bar '".to_string()),
        ];
        assert_eq!(select_terms(&tokens, &plain(0, false)), vec!["rust", " foo bar "]);
    }

    #[test]
    fn test_blank_exact_phrase_dropped() {
        let tokens = tokenize("\"  \" книги \" \"");
        assert_eq!(select_terms(&tokens, &plain(0, false)), vec!["книги"]);
        assert!(select_terms(&tokenize("\" \""), &plain(0, false)).is_empty());
    }

    #[test]
    fn test_exact_phrase_kept_whole() {
        let tokens = tokenize("find \"foo bar\" now");
        assert_eq!(select_terms(&tokens, &plain(0, false)), vec!["find", "foo bar", "now"]);
    }

    #[test]
    fn test_min_chars_counts_characters() {
        let tokens = tokenize("ab abc abcd да мир");
        assert_eq!(select_terms(&tokens, &plain(3, false)), vec!["abc", "abcd", "мир"]);
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let tokens = tokenize("beta alpha beta gamma alpha");
        assert_eq!(select_terms(&tokens, &plain(0, false)), vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_cap_keeps_first_terms() {
        let tokens = tokenize("t01 t02 t03 t04 t05 t06 t07 t08 t09 t10 t11");
        let selected = select_terms(&tokens, &plain(0, true));
        assert_eq!(selected.len(), 9);
        assert_eq!(selected.first().map(String::as_str), Some("t01"));
        assert_eq!(selected.last().map(String::as_str), Some("t09"));

        assert_eq!(select_terms(&tokens, &plain(0, false)).len(), 11);
    }

    #[test]
    fn test_stemming_merges_forms() {
        let tokens = tokenize("Книги книгами Ёлки");
        let options = SearchOptions::new(0, true, true);
        assert_eq!(select_terms(&tokens, &options), vec!["книг", "елк"]);
    }

    #[test]
    fn test_pretext_only_phrase_vanishes() {
        let tokens = tokenize("\"и в\" книги");
        let options = SearchOptions::new(0, true, true);
        assert_eq!(select_terms(&tokens, &options), vec!["книг"]);
    }

    #[test]
    fn test_pretext_kept_when_disabled() {
        let tokens = tokenize("под");
        let mut options = SearchOptions::new(0, true, true);
        options.strip_pretext = false;
        assert_eq!(select_terms(&tokens, &options), vec!["под"]);
    }

    #[test]
    fn test_consonant_word_unchanged() {
        let tokens = tokenize("бвгд");
        let options = SearchOptions::new(0, true, false);
        assert_eq!(select_terms(&tokens, &options), vec!["бвгд"]);
    }
}
