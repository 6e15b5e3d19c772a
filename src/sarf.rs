//! Conjugation models consumed by the chart builders.
//!
//! These are produced by a [`ConjugationBuilder`] (or loaded from JSON) and
//! are read-only as far as document assembly is concerned.

use serde::{Deserialize, Serialize};

use crate::arabic::{ArabicWord, RootLetters, RootWord};
use crate::error::Error;

/// Grammatical category of a detailed-chart stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SarfTermType {
    PastTense,
    PresentTense,
    PastPassiveTense,
    PresentPassiveTense,
    VerbalNoun,
    ActiveParticipleMasculine,
    ActiveParticipleFeminine,
    PassiveParticipleMasculine,
    PassiveParticipleFeminine,
    Imperative,
    Forbidding,
    NounOfPlaceAndTime,
}

/// Title data for one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConjugationHeader {
    pub root_letters: RootLetters,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    pub type_label1: ArabicWord,
    pub type_label2: ArabicWord,
    pub type_label3: ArabicWord,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveLine {
    pub past_tense: Option<RootWord>,
    pub present_tense: Option<RootWord>,
    pub active_participle_masculine: Option<RootWord>,
    pub verbal_nouns: Vec<Option<RootWord>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveLine {
    pub past_passive_tense: Option<RootWord>,
    pub present_passive_tense: Option<RootWord>,
    pub passive_participle_masculine: Option<RootWord>,
    pub verbal_nouns: Vec<Option<RootWord>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImperativeAndForbiddingLine {
    pub imperative: Option<RootWord>,
    pub forbidding: Option<RootWord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdverbLine {
    pub adverbs: Vec<Option<RootWord>>,
}

/// Abbreviated chart (Sarf Sagheer). Each missing line drops its row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarfSagheer {
    pub active_line: Option<ActiveLine>,
    pub passive_line: Option<PassiveLine>,
    pub imperative_and_forbidding_line: Option<ImperativeAndForbiddingLine>,
    pub adverb_line: Option<AdverbLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConjugationStack {
    pub label: Option<SarfTermType>,
    pub default_value: Option<RootWord>,
    pub conjugations: Vec<Option<RootWord>>,
}

impl ConjugationStack {
    pub fn new(label: SarfTermType, default_value: RootWord, conjugations: Vec<RootWord>) -> Self {
        ConjugationStack {
            label: Some(label),
            default_value: Some(default_value),
            conjugations: conjugations.into_iter().map(Some).collect(),
        }
    }
}

/// Two stacks shown side by side. The right stack may be missing when a
/// category only exists on one side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SarfKabeerPair {
    pub left_side_stack: ConjugationStack,
    #[serde(default)]
    pub right_side_stack: Option<ConjugationStack>,
}

impl SarfKabeerPair {
    pub fn new(left: ConjugationStack, right: ConjugationStack) -> Self {
        SarfKabeerPair { left_side_stack: left, right_side_stack: Some(right) }
    }

    pub fn left_only(left: ConjugationStack) -> Self {
        SarfKabeerPair { left_side_stack: left, right_side_stack: None }
    }
}

/// Detailed chart (Sarf Kabeer).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarfKabeer {
    pub active_tense_pair: Option<SarfKabeerPair>,
    pub verbal_noun_pair: Option<SarfKabeerPair>,
    pub active_participle_pair: Option<SarfKabeerPair>,
    pub passive_tense_pair: Option<SarfKabeerPair>,
    pub passive_participle_pair: Option<SarfKabeerPair>,
    pub imperative_and_forbidding_pair: Option<SarfKabeerPair>,
    pub adverb_pairs: Vec<SarfKabeerPair>,
}

impl SarfKabeer {
    /// The six fixed pairs in chart order followed by the adverb pairs.
    pub fn pairs(&self) -> impl Iterator<Item = &SarfKabeerPair> {
        [
            &self.active_tense_pair,
            &self.verbal_noun_pair,
            &self.active_participle_pair,
            &self.passive_tense_pair,
            &self.passive_participle_pair,
            &self.imperative_and_forbidding_pair,
        ]
        .into_iter()
        .flatten()
        .chain(self.adverb_pairs.iter())
    }
}

/// One flattened stack: type tag, caption and forms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SarfTerm {
    pub term_type: Option<SarfTermType>,
    pub label: Option<ArabicWord>,
    pub values: Vec<Option<ArabicWord>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarfChart {
    pub header: Option<ConjugationHeader>,
    pub sarf_sagheer: Option<SarfSagheer>,
    pub sarf_kabeer: Option<SarfKabeer>,
}

impl SarfChart {
    pub fn new(
        header: ConjugationHeader,
        sarf_sagheer: Option<SarfSagheer>,
        sarf_kabeer: Option<SarfKabeer>,
    ) -> Self {
        SarfChart { header: Some(header), sarf_sagheer, sarf_kabeer }
    }

    /// Chart with only the detailed form and no title data.
    pub fn from_sarf_kabeer(sarf_kabeer: SarfKabeer) -> Self {
        SarfChart { header: None, sarf_sagheer: None, sarf_kabeer: Some(sarf_kabeer) }
    }

    /// Human readable name used in log lines and conversion reports.
    pub fn describe(&self) -> String {
        match &self.header {
            Some(header) => {
                let template = header.template.as_deref().unwrap_or("-");
                format!("{} ({template})", header.root_letters.display())
            }
            None => "<untitled chart>".to_string(),
        }
    }
}

/// Everything a conjugation engine needs to produce one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConjugationRequest {
    pub template: String,
    #[serde(default)]
    pub remove_passive_line: bool,
    #[serde(default)]
    pub skip_rule_processing: bool,
    #[serde(default)]
    pub translation: Option<String>,
    pub root_letters: RootLetters,
    #[serde(default)]
    pub verbal_nouns: Vec<String>,
    #[serde(default)]
    pub adverbs: Vec<String>,
}

impl ConjugationRequest {
    pub fn new(template: impl Into<String>, root_letters: RootLetters) -> Self {
        ConjugationRequest {
            template: template.into(),
            remove_passive_line: false,
            skip_rule_processing: false,
            translation: None,
            root_letters,
            verbal_nouns: Vec::new(),
            adverbs: Vec::new(),
        }
    }
}

/// Produces charts from root letters and a template. Implemented outside
/// this crate by the conjugation engine.
pub trait ConjugationBuilder: Send + Sync {
    fn do_conjugation(&self, request: &ConjugationRequest) -> Result<SarfChart, Error>;
}

/// A saved list of conjugation requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConjugationTemplate {
    #[serde(default)]
    pub data: Vec<ConjugationRequest>,
}
