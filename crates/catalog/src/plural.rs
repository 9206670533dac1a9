//! Plural form selection for numerus messages.

/// How a language maps a count onto its plural forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// A single form (Chinese, Japanese, Korean, Thai, ...).
    Invariant,
    /// `n == 1` is singular (English, German, Spanish, Italian, ...).
    OneOther,
    /// `n <= 1` is singular (French, Brazilian Portuguese).
    ZeroOneOther,
    /// One / few / many (Russian, Ukrainian, Serbian, ...).
    Slavic,
    /// One / few / other with the Czech and Slovak split.
    Czech,
    /// One / few / many with the Polish split.
    Polish,
}

impl PluralRule {
    /// Pick the rule for a language tag such as `fr`, `pt_BR` or `ru-RU`.
    pub fn for_language(tag: &str) -> Self {
        let lower = tag.to_lowercase().replace('-', "_");
        let base = lower.split('_').next().unwrap_or("");
        match base {
            "zh" | "ja" | "ko" | "th" | "vi" | "id" | "ms" | "tr" => PluralRule::Invariant,
            "fr" => PluralRule::ZeroOneOther,
            "pt" if lower == "pt_br" => PluralRule::ZeroOneOther,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => PluralRule::Slavic,
            "cs" | "sk" => PluralRule::Czech,
            "pl" => PluralRule::Polish,
            _ => PluralRule::OneOther,
        }
    }

    /// Number of forms a complete translation provides.
    pub fn form_count(self) -> usize {
        match self {
            PluralRule::Invariant => 1,
            PluralRule::OneOther | PluralRule::ZeroOneOther => 2,
            PluralRule::Slavic | PluralRule::Czech | PluralRule::Polish => 3,
        }
    }

    /// Index of the form to use for `n`.
    pub fn form_index(self, n: u64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            PluralRule::Invariant => 0,
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::ZeroOneOther => usize::from(n > 1),
            PluralRule::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_for_language() {
        assert_eq!(PluralRule::for_language("fr"), PluralRule::ZeroOneOther);
        assert_eq!(PluralRule::for_language("fr_CA"), PluralRule::ZeroOneOther);
        assert_eq!(PluralRule::for_language("pt_BR"), PluralRule::ZeroOneOther);
        assert_eq!(PluralRule::for_language("pt"), PluralRule::OneOther);
        assert_eq!(PluralRule::for_language("ru-RU"), PluralRule::Slavic);
        assert_eq!(PluralRule::for_language("ja"), PluralRule::Invariant);
        assert_eq!(PluralRule::for_language("de"), PluralRule::OneOther);
    }

    #[test]
    fn test_french_zero_is_singular() {
        let rule = PluralRule::ZeroOneOther;
        assert_eq!(rule.form_index(0), 0);
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(2), 1);
    }

    #[test]
    fn test_english_zero_is_plural() {
        let rule = PluralRule::OneOther;
        assert_eq!(rule.form_index(0), 1);
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(7), 1);
    }

    #[test]
    fn test_slavic_forms() {
        let rule = PluralRule::Slavic;
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(21), 0);
        assert_eq!(rule.form_index(3), 1);
        assert_eq!(rule.form_index(12), 2);
        assert_eq!(rule.form_index(25), 2);
        assert_eq!(rule.form_count(), 3);
    }

    #[test]
    fn test_polish_forms() {
        let rule = PluralRule::Polish;
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(21), 2);
        assert_eq!(rule.form_index(22), 1);
    }
}
