/// Частина пошукового запиту після розбиття
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Фраза в лапках шукається цілком, пробіли всередині зберігаються
    ExactPhrase(String),
    /// Окреме слово
    Word(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::ExactPhrase(text) | Token::Word(text) => text,
        }
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '\t' | ' ' | '"' | ',' | '+') || c.is_whitespace()
}

/// Розбиває текст на слова та фрази в лапках.
/// Незакрита лапка захоплює текст до кінця рядка
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '"' {
            let body = &rest[1..];
            match body.find('"') {
                Some(end) => {
                    tokens.push(Token::ExactPhrase(body[..end].to_string()));
                    rest = &body[end + 1..];
                }
                None => {
                    tokens.push(Token::ExactPhrase(body.to_string()));
                    rest = "";
                }
            }
        } else if is_separator(c) {
            rest = &rest[c.len_utf8()..];
        } else {
            let end = rest.find(is_separator).unwrap_or(rest.len());
            tokens.push(Token::Word(rest[..end].to_string()));
            rest = &rest[end..];
        }
    }

    tokens
}
