pub mod abbreviated;
pub mod arabic;
pub mod batch;
pub mod chart;
pub mod collector;
pub mod config;
pub mod detailed;
pub mod docx;
mod error;
pub mod engine;
pub mod helper;
pub mod model;
pub mod sarf;
pub mod wml;

pub use arabic::{ArabicWord, RootLetters, RootWord};
pub use batch::ChartBatch;
pub use collector::SarfEngineHelper;
pub use config::{ChartConfiguration, SarfChartComparator, SortDirection, SortDirective};
pub use engine::{ConversionReport, SarfEngine};
pub use error::Error;
pub use sarf::{ConjugationBuilder, SarfChart, SarfKabeer, SarfSagheer};

use std::path::Path;

/// Sorts `charts` by the configuration's directive and writes them to `output`.
pub fn convert_charts_to_docx(
    mut charts: Vec<SarfChart>,
    configuration: ChartConfiguration,
    output: &Path,
    template: Option<&Path>,
) -> Result<ConversionReport, Error> {
    configuration.comparator().sort(&mut charts);
    let mut engine = SarfEngine::with_configuration(output, configuration, charts);
    if let Some(template) = template {
        engine = engine.with_template(template);
    }
    engine.convert()
}
