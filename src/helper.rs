use std::sync::LazyLock;

use crate::arabic::{ArabicWord, RootWord};
use crate::model::{Cell, CellBorders, Paragraph, Row, Run, RunFonts, RunProperties};
use crate::sarf::{ActiveLine, ConjugationStack, SarfKabeer, SarfKabeerPair, SarfTerm};

pub const NO_SPACING_STYLE: &str = "NoSpacing";
pub const ARABIC_NORMAL_STYLE: &str = "Arabic-Normal";
pub const ARABIC_TABLE_CENTER_STYLE: &str = "Arabic-Table-Center";
pub const ARABIC_CAPTION_STYLE: &str = "Arabic-Caption";
pub const ARABIC_HEADING_STYLE: &str = "Arabic-Heading1";
pub const ARABIC_TOC_STYLE: &str = "TOC1";

/// Paragraph styles the generated document refers to.
pub const REQUIRED_STYLES: [&str; 6] = [
    NO_SPACING_STYLE,
    ARABIC_NORMAL_STYLE,
    ARABIC_TABLE_CENTER_STYLE,
    ARABIC_CAPTION_STYLE,
    ARABIC_HEADING_STYLE,
    ARABIC_TOC_STYLE,
];

/// Half-point sizes.
pub const SIZE_56: u32 = 56;
pub const SIZE_32: u32 = 32;

pub const RFONTS_CS: RunFonts = RunFonts {
    ascii: None,
    h_ansi: None,
    complex_script_hint: true,
    east_asia_theme: None,
};

pub const GEORGIA_FONTS: RunFonts = RunFonts {
    ascii: Some("Georgia"),
    h_ansi: Some("Georgia"),
    complex_script_hint: false,
    east_asia_theme: None,
};

pub const BOOKMARK_NAME_PREFIX: &str = "bm";

/// "الأمر منه"
pub static COMMAND_PREFIX: LazyLock<ArabicWord> =
    LazyLock::new(|| ArabicWord::new("\u{0627}\u{0644}\u{0623}\u{0645}\u{0631} \u{0645}\u{0646}\u{0647}"));

/// "ونهي عنه"
pub static FORBIDDING_PREFIX: LazyLock<ArabicWord> =
    LazyLock::new(|| ArabicWord::new("\u{0648}\u{0646}\u{0647}\u{064A} \u{0639}\u{0646}\u{0647}"));

/// "والظرف منه"
pub static ZARF_PREFIX: LazyLock<ArabicWord> = LazyLock::new(|| {
    ArabicWord::new("\u{0648}\u{0627}\u{0644}\u{0638}\u{0631}\u{0641} \u{0645}\u{0646}\u{0647}")
});

/// State shared by every builder while one document is assembled.
#[derive(Debug, Default)]
pub struct BuildContext {
    bookmark_count: u32,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next bookmark id; starts at 1 and never repeats within this build.
    pub fn next_bookmark_id(&mut self) -> u32 {
        self.bookmark_count += 1;
        self.bookmark_count
    }

    pub fn bookmarks_issued(&self) -> u32 {
        self.bookmark_count
    }
}

pub fn bookmark_name(id: u32) -> String {
    format!("{BOOKMARK_NAME_PREFIX}_{id}")
}

/// Right-to-left run with the complex-script font hint.
pub fn arabic_run_properties() -> RunProperties {
    RunProperties {
        fonts: Some(RFONTS_CS),
        rtl: true,
        ..Default::default()
    }
}

pub fn no_spacing_paragraph() -> Paragraph {
    Paragraph::styled(NO_SPACING_STYLE)
}

/// Blank border-less row spanning `grid_span` columns.
pub fn separator_row(grid_span: u32) -> Row {
    Row::new(vec![Cell::new(
        grid_span,
        CellBorders::Nil,
        vec![no_spacing_paragraph()],
    )])
}

/// Paragraph holding one Arabic word, or the space placeholder when absent.
pub fn arabic_term_paragraph(word: Option<&ArabicWord>, style: &'static str) -> Paragraph {
    let text = word.map_or_else(|| ArabicWord::space().to_string(), ArabicWord::to_string);
    Paragraph::styled(style).add_run(Run::text(text, arabic_run_properties()))
}

/// Joins the present words with the "and" conjunction, left to right.
pub fn multi_word<'a, I>(words: I) -> ArabicWord
where
    I: IntoIterator<Item = Option<&'a ArabicWord>>,
{
    words
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<ArabicWord>, word| match acc {
            None => Some(word.clone()),
            Some(joined) => Some(joined.concat_with_and(word)),
        })
        .unwrap_or_else(ArabicWord::space)
}

pub fn multi_root_word(root_words: &[Option<RootWord>]) -> ArabicWord {
    multi_word(root_words.iter().map(|w| w.as_ref().map(RootWord::root_word)))
}

/// "past present" of the active line, used as the chart title.
pub fn title_word(active_line: Option<&ActiveLine>) -> ArabicWord {
    let Some(line) = active_line else {
        return ArabicWord::space();
    };
    let root = |w: &Option<RootWord>| {
        w.as_ref()
            .map_or_else(ArabicWord::space, |w| w.root_word().clone())
    };
    root(&line.past_tense).concat_with_space(&root(&line.present_tense))
}

/// Flattens the detailed chart into (right, left) term pairs; a pair
/// without a right side becomes (left, None).
pub fn from_sarf_kabeer(sarf_kabeer: Option<&SarfKabeer>) -> Vec<Option<SarfTerm>> {
    let mut terms = Vec::new();
    if let Some(kabeer) = sarf_kabeer {
        for pair in kabeer.pairs() {
            load_terms(&mut terms, pair);
        }
    }
    terms
}

fn load_terms(terms: &mut Vec<Option<SarfTerm>>, pair: &SarfKabeerPair) {
    // The right side decides whether the pair is symmetric.
    let left = create_sarf_term(&pair.left_side_stack);
    match pair
        .right_side_stack
        .as_ref()
        .filter(|stack| !stack.conjugations.is_empty())
    {
        Some(right) => {
            terms.push(Some(create_sarf_term(right)));
            terms.push(Some(left));
        }
        // One-sided pair: the left stack drives the rows, the other half stays blank.
        None => {
            terms.push(Some(left));
            terms.push(None);
        }
    }
}

fn create_sarf_term(stack: &ConjugationStack) -> SarfTerm {
    SarfTerm {
        term_type: stack.label,
        label: stack.default_value.as_ref().map(|v| v.label().clone()),
        values: stack
            .conjugations
            .iter()
            .map(|c| c.as_ref().map(|c| c.label().clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sarf::SarfTermType;

    fn words(texts: &[Option<&str>]) -> Vec<Option<ArabicWord>> {
        texts.iter().map(|t| t.map(ArabicWord::new)).collect()
    }

    fn join(texts: &[Option<&str>]) -> String {
        let words = words(texts);
        multi_word(words.iter().map(Option::as_ref)).to_string()
    }

    #[test]
    fn multi_word_empty_is_space() {
        assert_eq!(join(&[]), " ");
        assert_eq!(join(&[None, None]), " ");
    }

    #[test]
    fn multi_word_single_is_unchanged() {
        assert_eq!(join(&[Some("نَصْر")]), "نَصْر");
    }

    #[test]
    fn multi_word_joins_left_to_right_skipping_gaps() {
        assert_eq!(
            join(&[Some("أ"), None, Some("ب"), Some("ج")]),
            "أ و ب و ج"
        );
    }

    #[test]
    fn title_is_past_then_present() {
        let line = ActiveLine {
            past_tense: Some(RootWord::new("X")),
            present_tense: Some(RootWord::new("Y")),
            ..Default::default()
        };
        assert_eq!(title_word(Some(&line)).to_unicode(), "X Y");
    }

    #[test]
    fn title_without_active_line_is_placeholder() {
        assert_eq!(title_word(None).to_unicode(), " ");
    }

    #[test]
    fn title_substitutes_missing_tense() {
        let line = ActiveLine {
            past_tense: Some(RootWord::new("X")),
            ..Default::default()
        };
        assert_eq!(title_word(Some(&line)).to_unicode(), "X  ");
    }

    #[test]
    fn bookmark_ids_strictly_increase() {
        let mut ctx = BuildContext::new();
        let ids: Vec<u32> = (0..5).map(|_| ctx.next_bookmark_id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(bookmark_name(ids[2]), "bm_3");
        assert_eq!(ctx.bookmarks_issued(), 5);
    }

    #[test]
    fn flatten_reads_right_before_left() {
        let left = ConjugationStack::new(
            SarfTermType::PresentTense,
            RootWord::new("يَنْصُرُ"),
            vec![RootWord::new("a"), RootWord::new("b")],
        );
        let right = ConjugationStack::new(
            SarfTermType::PastTense,
            RootWord::new("نَصَرَ"),
            vec![RootWord::new("c"), RootWord::new("d")],
        );
        let kabeer = SarfKabeer {
            active_tense_pair: Some(SarfKabeerPair::new(left, right)),
            ..Default::default()
        };
        let terms = from_sarf_kabeer(Some(&kabeer));
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].as_ref().unwrap().term_type, Some(SarfTermType::PastTense));
        assert_eq!(terms[1].as_ref().unwrap().term_type, Some(SarfTermType::PresentTense));
    }

    #[test]
    fn flatten_missing_right_side_puts_left_first() {
        let left = ConjugationStack::new(
            SarfTermType::NounOfPlaceAndTime,
            RootWord::new("مَنْصَر"),
            vec![RootWord::new("a")],
        );
        let kabeer = SarfKabeer {
            adverb_pairs: vec![SarfKabeerPair::left_only(left)],
            ..Default::default()
        };
        let terms = from_sarf_kabeer(Some(&kabeer));
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].as_ref().unwrap().values.len(), 1);
        assert!(terms[1].is_none());
    }

    #[test]
    fn flatten_empty_right_stack_counts_as_absent() {
        let left = ConjugationStack::new(
            SarfTermType::NounOfPlaceAndTime,
            RootWord::new("مَنْصَر"),
            vec![RootWord::new("a"), RootWord::new("b")],
        );
        let right = ConjugationStack::new(SarfTermType::NounOfPlaceAndTime, RootWord::new("x"), Vec::new());
        let kabeer = SarfKabeer {
            adverb_pairs: vec![SarfKabeerPair::new(left, right)],
            ..Default::default()
        };
        let terms = from_sarf_kabeer(Some(&kabeer));
        assert_eq!(terms.len(), 2);
        let left_term = terms[0].as_ref().unwrap();
        assert_eq!(left_term.label, Some(ArabicWord::new("مَنْصَر")));
        assert_eq!(left_term.values.len(), 2);
        assert!(terms[1].is_none());

        let table = crate::detailed::DetailedConjugation::new(terms).chart().unwrap();
        let caption = &table.rows[0];
        assert_eq!(caption.cells[0].borders, CellBorders::Nil);
        assert_eq!(caption.cells[0].paragraphs[0].text(), " ");
        let values = &table.rows[1];
        assert!(values.cells[..3].iter().all(|c| c.borders == CellBorders::Nil));
        assert!(values.cells[..3].iter().all(|c| c.paragraphs[0].text() == " "));
        assert_eq!(values.cells[4].paragraphs[0].text(), "a");
    }

    #[test]
    fn flatten_nothing_is_empty() {
        assert!(from_sarf_kabeer(None).is_empty());
        assert!(from_sarf_kabeer(Some(&SarfKabeer::default())).is_empty());
    }

    #[test]
    fn separator_row_has_nil_borders() {
        let row = separator_row(7);
        assert_eq!(row.span(), 7);
        assert_eq!(row.cells[0].borders, CellBorders::Nil);
        assert_eq!(row.cells[0].paragraphs[0].style, Some(NO_SPACING_STYLE));
    }
}
