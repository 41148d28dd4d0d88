//! Per-language prompt text. Adding a locale means adding a table entry.
//!
//! Line templates use named placeholders that `prompt::render` fills in:
//! `{move}`, `{player}`, `{coord}`, `{before}`, `{after}`, `{swing}`,
//! `{direction}`, `{delta}`, `{prev}`, `{cur}`, `{alt}`, `{alt_winrate}`,
//! `{visits}`.

/// All text needed to prompt the model in one language.
#[derive(Debug)]
pub struct LanguageTemplate {
    pub code: &'static str,
    pub system: &'static str,
    pub black: &'static str,
    pub white: &'static str,
    pub increased: &'static str,
    pub decreased: &'static str,
    /// Used when the direction is flat or unknown.
    pub changed: &'static str,
    pub header: &'static str,
    pub winrate: &'static str,
    pub score: &'static str,
    pub alternative: &'static str,
    pub request: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "en";

const ENGLISH: LanguageTemplate = LanguageTemplate {
    code: "en",
    system: "You are a concise Go (Baduk, Weiqi) commentator. Answer in 1-3 short sentences \
             of plain text, with no markdown or other formatting. Focus on the tactical or \
             strategic idea behind the move.",
    black: "Black",
    white: "White",
    increased: "increased",
    decreased: "decreased",
    changed: "changed",
    header: "Move {move}: {player} played {coord}.",
    winrate: "{player}'s winrate {direction} from {before}% to {after}% (swing: {swing}%).",
    score: "{player}'s score lead {direction} by {delta} points (from {prev} to {cur}).",
    alternative: "The engine preferred {alt} ({alt_winrate}% winrate) after {visits} visits.",
    request: "Explain briefly why this move matters and the strategic idea behind it.",
};

const RUSSIAN: LanguageTemplate = LanguageTemplate {
    code: "ru",
    system: "Вы лаконичный комментатор партии Го. Пишите 1–3 коротких предложения, простой \
             текст, без markdown и другого форматирования. Сосредоточьтесь на тактической \
             или стратегической идее хода.",
    black: "Чёрные",
    white: "Белые",
    increased: "рост",
    decreased: "падение",
    changed: "изменение",
    header: "Ход {move}: {player}, {coord}.",
    winrate: "Винрейт ({player}): с {before}% до {after}%, {direction} на {swing}%.",
    score: "Преимущество ({player}): с {prev} до {cur}, {direction} на {delta} очка.",
    alternative: "Движок предпочитал {alt} (винрейт {alt_winrate}%), визитов: {visits}.",
    request: "Коротко объясните, почему это важно и какова стратегическая идея.",
};

const UKRAINIAN: LanguageTemplate = LanguageTemplate {
    code: "uk",
    system: "Ви лаконічний коментатор гри Го. Пишіть 1–3 короткі речення, простий текст, \
             без markdown та іншого форматування. Зосередьтеся на тактичній або \
             стратегічній ідеї ходу.",
    black: "Чорні",
    white: "Білі",
    increased: "зростання",
    decreased: "падіння",
    changed: "зміна",
    header: "Хід {move}: {player}, {coord}.",
    winrate: "Вінрейт ({player}): з {before}% до {after}%, {direction} на {swing}%.",
    score: "Перевага ({player}): з {prev} до {cur}, {direction} на {delta} очка.",
    alternative: "Рушій віддавав перевагу {alt} (вінрейт {alt_winrate}%), візитів: {visits}.",
    request: "Коротко поясніть, чому це важливо і яка стратегічна ідея.",
};

const CHINESE: LanguageTemplate = LanguageTemplate {
    code: "zh",
    system: "你是一位简洁的围棋解说员。请用1到3句简短的纯文本回答，不要使用markdown或任何格式。\
             重点说明这步棋的战术或战略意图。",
    black: "黑棋",
    white: "白棋",
    increased: "上升",
    decreased: "下降",
    changed: "变化",
    header: "第{move}手：{player} {coord}。",
    winrate: "{player}胜率从{before}%变为{after}%（{direction}{swing}%）。",
    score: "{player}目数领先从{prev}变为{cur}（{direction}{delta}目）。",
    alternative: "引擎首选{alt}（胜率{alt_winrate}%），访问数{visits}。",
    request: "请简要说明这步棋为什么关键以及其战略意图。",
};

const JAPANESE: LanguageTemplate = LanguageTemplate {
    code: "ja",
    system: "あなたは簡潔な囲碁の解説者です。1〜3文の短いプレーンテキストで答え、\
             マークダウンなどの書式は使わないでください。この手の戦術的または戦略的な\
             狙いに焦点を当ててください。",
    black: "黒",
    white: "白",
    increased: "上昇",
    decreased: "下降",
    changed: "変化",
    header: "第{move}手：{player} {coord}。",
    winrate: "{player}の勝率が{before}%から{after}%に変化（{direction}{swing}%）。",
    score: "{player}の目数差が{prev}から{cur}に変化（{direction}{delta}目）。",
    alternative: "エンジンの推奨手は{alt}（勝率{alt_winrate}%）、探索数{visits}。",
    request: "この手がなぜ重要か、その戦略的な狙いを簡潔に説明してください。",
};

/// The lookup table. The first entry is the default.
pub static TEMPLATES: &[LanguageTemplate] = &[ENGLISH, RUSSIAN, UKRAINIAN, CHINESE, JAPANESE];

/// Resolve a language code to its template, falling back to English.
///
/// Matching ignores case and region subtags, so `ru-RU` and `RU` both pick
/// the Russian entry.
pub fn template_for(code: &str) -> &'static LanguageTemplate {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    TEMPLATES
        .iter()
        .find(|t| t.code == primary)
        .unwrap_or(&TEMPLATES[0])
}

pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|t| t.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(TEMPLATES[0].code, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(template_for("ru").code, "ru");
        assert_eq!(template_for("uk").code, "uk");
        assert_eq!(template_for("ZH").code, "zh");
        assert_eq!(template_for("ja-JP").code, "ja");
        assert_eq!(template_for("ru_RU").code, "ru");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(template_for("xx").code, "en");
        assert_eq!(template_for("").code, "en");
    }

    #[test]
    fn test_codes_unique() {
        let codes: Vec<&str> = supported_languages().collect();
        let mut deduped = codes.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(codes.len(), deduped.len());
    }

    #[test]
    fn test_every_template_keeps_placeholders() {
        for t in TEMPLATES {
            assert!(t.header.contains("{move}"), "{} header", t.code);
            assert!(t.header.contains("{coord}"), "{} header", t.code);
            assert!(t.winrate.contains("{swing}"), "{} winrate", t.code);
            assert!(t.score.contains("{delta}"), "{} score", t.code);
            assert!(t.alternative.contains("{alt}"), "{} alternative", t.code);
        }
    }
}
