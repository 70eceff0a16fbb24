/// Модуль для стемінгу (нормалізації) російських слів
/// Правила працюють тільки з областю RV, тобто частиною слова після першої голосної

static RUSSIAN_VOWELS: &str = "аеиоуыэюя";

/// Літери, після яких дозволено відкидати "залежні" закінчення
static GATE_VOWELS: &str = "ая";

/// Набір закінчень, які перевіряються разом на одному кроці.
/// `gated`: закінчення, що відкидаються тільки після "а" або "я"
struct SuffixClass {
    plain: &'static [&'static str],
    gated: &'static [&'static str],
}

static PERFECTIVE_GROUND: SuffixClass = SuffixClass {
    plain: &["ив", "ивши", "ившись", "ыв", "ывши", "ывшись"],
    gated: &["в", "вши", "вшись"],
};

static REFLEXIVE: SuffixClass = SuffixClass {
    plain: &["ся", "сь"],
    gated: &[],
};

static ADJECTIVE: SuffixClass = SuffixClass {
    plain: &[
        "ее", "ие", "ые", "ое", "ими", "ыми", "ей", "ий", "ый", "ой", "ем", "им", "ым", "ом",
        "его", "ого", "еых", "ую", "юю", "ая", "яя", "ою", "ею",
    ],
    gated: &[],
};

static PARTICIPLE: SuffixClass = SuffixClass {
    plain: &["ивш", "ывш", "ующ"],
    gated: &["ем", "нн", "вш", "ющ", "щ"],
};

static VERB: SuffixClass = SuffixClass {
    plain: &[
        "ила", "ыла", "ена", "ейте", "уйте", "ите", "или", "ыли", "ей", "уй", "ил", "ыл", "им",
        "ым", "ены", "ить", "ыть", "ишь", "ую", "ю",
    ],
    gated: &[
        "ла", "на", "ете", "йте", "ли", "й", "л", "ем", "н", "ло", "но", "ет", "ют", "ны", "ть",
        "ешь", "нно",
    ],
};

static NOUN: SuffixClass = SuffixClass {
    plain: &[
        "а", "ев", "ов", "ие", "ье", "е", "иями", "ями", "ами", "еи", "ии", "и", "ией", "ей",
        "ой", "ий", "й", "ы", "ь", "ию", "ью", "ю", "ия", "ья", "я",
    ],
    gated: &[],
};

static SUPERLATIVE: SuffixClass = SuffixClass {
    plain: &["ейше", "ейш"],
    gated: &[],
};

static DERIVATIONAL: SuffixClass = SuffixClass {
    plain: &["ость", "ост"],
    gated: &[],
};

fn is_vowel(c: char) -> bool {
    RUSSIAN_VOWELS.contains(c)
}

/// Ділить слово на початок (до першої голосної включно) та область RV.
/// Повертає None, якщо у слові немає жодної голосної
pub fn split_region(word: &str) -> Option<(&str, &str)> {
    let (pos, vowel) = word.char_indices().find(|&(_, c)| is_vowel(c))?;
    let split_at = pos + vowel.len_utf8();
    Some((&word[..split_at], &word[split_at..]))
}

/// Виконує стемінг слова (приведення до основи).
/// Очікує слово в нижньому регістрі; слово без голосних повертається без змін
pub fn stem_word(word: &str) -> String {
    let Some((head, rv)) = split_region(word) else {
        return word.to_string();
    };

    if rv.is_empty() {
        return word.to_string();
    }

    let mut rv = rv.to_string();

    // Крок 1
    if !strip_suffix(&mut rv, &PERFECTIVE_GROUND) {
        strip_suffix(&mut rv, &REFLEXIVE);

        if strip_suffix(&mut rv, &ADJECTIVE) {
            strip_suffix(&mut rv, &PARTICIPLE);
        } else if !strip_suffix(&mut rv, &VERB) {
            strip_suffix(&mut rv, &NOUN);
        }
    }

    // Крок 2
    if rv.ends_with('и') {
        rv.pop();
    }

    // Крок 3
    if has_derivational_shape(&rv) {
        strip_suffix(&mut rv, &DERIVATIONAL);
    }

    // Крок 4
    if rv.ends_with('ь') {
        rv.pop();
    } else {
        strip_suffix(&mut rv, &SUPERLATIVE);
        if rv.ends_with("нн") {
            rv.pop();
        }
    }

    format!("{}{}", head, rv)
}

/// Відкидає найдовше закінчення класу, яке підходить.
/// Повертає true, якщо щось було відкинуто
fn strip_suffix(rv: &mut String, class: &SuffixClass) -> bool {
    let text = rv.as_str();
    let plain = class.plain.iter().filter(|suffix| text.ends_with(**suffix));
    let gated = class
        .gated
        .iter()
        .filter(|suffix| text.ends_with(**suffix) && preceded_by_gate(text, suffix));

    let longest = plain.chain(gated).max_by_key(|suffix| suffix.len()).copied();
    match longest {
        Some(suffix) => {
            rv.truncate(rv.len() - suffix.len());
            true
        }
        None => false,
    }
}

/// Перевіряє літеру безпосередньо перед закінченням (тільки в межах RV)
fn preceded_by_gate(rv: &str, suffix: &str) -> bool {
    rv[..rv.len() - suffix.len()]
        .chars()
        .next_back()
        .is_some_and(|c| GATE_VOWELS.contains(c))
}

/// Форма для словотвірного суфікса: приголосна, голосні, приголосні, голосна,
/// а в кінці "ост" або "ость", де "о" може бути тією самою голосною
fn has_derivational_shape(rv: &str) -> bool {
    let stem = match rv.strip_suffix("сть").or_else(|| rv.strip_suffix("ст")) {
        Some(stem) if stem.ends_with('о') => stem,
        _ => return false,
    };

    // Рахуємо чергування груп голосних і приголосних, починаючи з першої приголосної
    let mut runs = 0;
    let mut previous: Option<bool> = None;
    for c in stem.chars() {
        let vowel = is_vowel(c);
        if previous.is_none() && vowel {
            continue;
        }
        if previous != Some(vowel) {
            runs += 1;
            previous = Some(vowel);
        }
    }

    runs >= 4
}
