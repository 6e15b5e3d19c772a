use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ChartConfiguration;
use crate::error::Error;
use crate::sarf::SarfChart;

/// Pre-computed charts saved as JSON, optionally with their configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartBatch {
    #[serde(default)]
    pub configuration: Option<ChartConfiguration>,
    pub charts: Vec<SarfChart>,
}

impl ChartBatch {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        let batch: ChartBatch = serde_json::from_reader(reader)?;
        log::debug!("Loaded {} chart(s) from {}", batch.charts.len(), path.display());
        Ok(batch)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortDirective;
    use crate::sarf::SarfTermType;

    #[test]
    fn parses_minimal_batch() {
        let json = r#"{
            "configuration": { "omit_toc": true, "sort_directive": "alphabetical" },
            "charts": [
                {
                    "header": {
                        "root_letters": { "first": "ن", "second": "ص", "third": "ر" },
                        "template": "FORM_I",
                        "type_label1": "a", "type_label2": "b", "type_label3": "c"
                    },
                    "sarf_sagheer": {
                        "active_line": {
                            "past_tense": { "word": "نَصَرَ" },
                            "present_tense": { "word": "يَنْصُرُ" }
                        }
                    },
                    "sarf_kabeer": {
                        "adverb_pairs": [
                            { "left_side_stack": {
                                "label": "NOUN_OF_PLACE_AND_TIME",
                                "conjugations": [ { "word": "مَنْصَرٌ" }, null ]
                            } }
                        ]
                    }
                }
            ]
        }"#;
        let batch = ChartBatch::from_json(json).unwrap();
        let config = batch.configuration.unwrap();
        assert!(config.omit_toc);
        assert_eq!(config.sort_directive, SortDirective::Alphabetical);
        let chart = &batch.charts[0];
        assert_eq!(chart.describe(), "ن ص ر (FORM_I)");
        let kabeer = chart.sarf_kabeer.as_ref().unwrap();
        let pair = &kabeer.adverb_pairs[0];
        assert!(pair.right_side_stack.is_none());
        assert_eq!(pair.left_side_stack.label, Some(SarfTermType::NounOfPlaceAndTime));
        assert_eq!(pair.left_side_stack.conjugations.len(), 2);
    }

    #[test]
    fn rejects_missing_charts() {
        assert!(matches!(ChartBatch::from_json("{}"), Err(Error::Json(_))));
    }
}
