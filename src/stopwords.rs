use once_cell::sync::Lazy;
use regex::Regex;

// Розділювачі у списку стоп-фраз: будь-які пробіли та переноси рядків
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Розділові знаки, які замінюються пробілом перед фільтрацією (лапки залишаємо для точних фраз)
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.,:;?!\-']+").unwrap());

/// Розібраний список стоп-фраз
#[derive(Debug, Clone)]
pub struct StopSpec {
    patterns: Vec<Regex>,
}

impl StopSpec {
    /// Розбирає список стоп-фраз, розділених комою, пробілом або новим рядком.
    /// `*` означає будь-яку послідовність символів, усе інше береться буквально
    pub fn parse(spec: &str) -> Self {
        let normalized = SEPARATOR_REGEX.replace_all(spec, ",");

        let patterns = normalized
            .trim_matches(',')
            .split(',')
            .filter(|phrase| !phrase.is_empty())
            .filter_map(|phrase| {
                let pattern = format!(r"(?i)(^|\s){}(\s|$)", phrase_pattern(phrase));
                match Regex::new(&pattern) {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        tracing::warn!("Пропускаємо стоп-фразу {:?}: {}", phrase, e);
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Видаляє всі входження стоп-фраз як окремих слів (без урахування регістру)
    pub fn erase(&self, text: &str) -> String {
        let mut result = text.to_string();

        for pattern in &self.patterns {
            // Сусідні входження ділять один пробіл, тому повторюємо до стабільного результату.
            // Кожна зміна або скорочує текст, або замінює пробільний символ на пробіл
            loop {
                let replaced = pattern.replace_all(&result, " ");
                if replaced == result.as_str() {
                    break;
                }
                result = replaced.into_owned();
            }
        }

        result.trim().to_string()
    }
}

/// Екранує фразу для регулярного виразу, замінюючи `*` на лінивий шаблон
fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("(.*?)")
}

/// Замінює послідовності розділових знаків одним пробілом
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION_REGEX.replace_all(text, " ").into_owned()
}

/// Видаляє стоп-фрази з тексту
pub fn remove_stop_phrases(text: &str, spec: &str) -> String {
    StopSpec::parse(spec).erase(text)
}
