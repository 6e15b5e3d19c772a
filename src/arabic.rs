use std::fmt;

use serde::{Deserialize, Serialize};

/// Arabic conjunction "and" used when joining several forms.
const WAW: char = '\u{0648}';

/// Immutable piece of Arabic text as it appears in a chart cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArabicWord(String);

impl ArabicWord {
    pub fn new(text: impl Into<String>) -> Self {
        ArabicWord(text.into())
    }

    /// Single space glyph used wherever a form is missing.
    pub fn space() -> Self {
        ArabicWord(" ".to_string())
    }

    pub fn to_unicode(&self) -> &str {
        &self.0
    }

    pub fn concat_with_space(&self, other: &ArabicWord) -> ArabicWord {
        ArabicWord(format!("{} {}", self.0, other.0))
    }

    pub fn concat_with_and(&self, other: &ArabicWord) -> ArabicWord {
        ArabicWord(format!("{} {WAW} {}", self.0, other.0))
    }
}

impl fmt::Display for ArabicWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArabicWord {
    fn from(s: &str) -> Self {
        ArabicWord::new(s)
    }
}

/// A conjugated form. `label` is the display variant (e.g. fully vowelled);
/// when absent the word itself is displayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootWord {
    pub word: ArabicWord,
    #[serde(default)]
    pub label: Option<ArabicWord>,
}

impl RootWord {
    pub fn new(word: impl Into<String>) -> Self {
        RootWord { word: ArabicWord::new(word), label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(ArabicWord::new(label));
        self
    }

    pub fn root_word(&self) -> &ArabicWord {
        &self.word
    }

    pub fn label(&self) -> &ArabicWord {
        self.label.as_ref().unwrap_or(&self.word)
    }
}

/// Root letters of a verb. Triliteral roots leave `fourth` empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RootLetters {
    pub first: char,
    pub second: char,
    pub third: char,
    #[serde(default)]
    pub fourth: Option<char>,
}

impl RootLetters {
    pub fn triliteral(first: char, second: char, third: char) -> Self {
        RootLetters { first, second, third, fourth: None }
    }

    pub fn quadriliteral(first: char, second: char, third: char, fourth: char) -> Self {
        RootLetters { first, second, third, fourth: Some(fourth) }
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        [Some(self.first), Some(self.second), Some(self.third), self.fourth]
            .into_iter()
            .flatten()
    }

    /// Letters separated by spaces, as shown in the chart header.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for (i, letter) in self.letters().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(letter);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_with_and_inserts_conjunction() {
        let a = ArabicWord::new("نَصْر");
        let b = ArabicWord::new("مَنْصَر");
        assert_eq!(a.concat_with_and(&b).to_unicode(), "نَصْر و مَنْصَر");
    }

    #[test]
    fn root_word_label_falls_back_to_word() {
        let plain = RootWord::new("نَصَرَ");
        assert_eq!(plain.label().to_unicode(), "نَصَرَ");
        let labelled = RootWord::new("نصر").with_label("نَصَرَ");
        assert_eq!(labelled.label().to_unicode(), "نَصَرَ");
        assert_eq!(labelled.root_word().to_unicode(), "نصر");
    }

    #[test]
    fn root_letters_display_skips_missing_fourth() {
        let tri = RootLetters::triliteral('ن', 'ص', 'ر');
        assert_eq!(tri.display(), "ن ص ر");
        let quad = RootLetters::quadriliteral('د', 'ح', 'ر', 'ج');
        assert_eq!(quad.display(), "د ح ر ج");
    }
}
