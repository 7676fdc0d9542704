//! Script detection
//!
//! First-page heuristic telling downstream formatting whether a document
//! carries Japanese or other CJK text.

use serde::Serialize;

/// Script mix of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptHint {
    Latin,
    /// Hiragana, katakana or CJK unified ideographs present
    Cjk,
}

impl ScriptHint {
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_cjk) {
            ScriptHint::Cjk
        } else {
            ScriptHint::Latin
        }
    }
}

fn is_cjk(c: char) -> bool {
    // Hiragana + Katakana, CJK Unified Ideographs
    ('\u{3040}'..='\u{30FF}').contains(&c) || ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(ScriptHint::detect("Adverse events were mild."), ScriptHint::Latin);
        assert_eq!(ScriptHint::detect("副作用は軽度"), ScriptHint::Cjk);
        assert_eq!(ScriptHint::detect("dose: カプセル"), ScriptHint::Cjk);
        assert_eq!(ScriptHint::detect(""), ScriptHint::Latin);
    }

    #[test]
    fn test_hangul_is_not_flagged() {
        assert_eq!(ScriptHint::detect("부작용"), ScriptHint::Latin);
    }
}
