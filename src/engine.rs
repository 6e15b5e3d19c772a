use std::path::PathBuf;

use crate::chart::MainConjugation;
use crate::config::ChartConfiguration;
use crate::docx;
use crate::error::Error;
use crate::helper::{ARABIC_HEADING_STYLE, ARABIC_TOC_STYLE, BuildContext};
use crate::model::{
    Alignment, Document, FieldCharType, Paragraph, Run, RunFonts, RunProperties,
    SectionProperties, TabStop,
};
use crate::sarf::{SarfChart, SarfKabeer};

/// Outcome of converting one chart of a batch.
#[derive(Debug)]
pub struct ChartOutcome {
    pub index: usize,
    pub chart: String,
    pub result: Result<(), Error>,
}

#[derive(Debug, Default)]
pub struct ConversionReport {
    pub outcomes: Vec<ChartOutcome>,
    pub toc: bool,
}

impl ConversionReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ChartOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Assembles a batch of charts into one document and writes it.
pub struct SarfEngine {
    path: PathBuf,
    configuration: ChartConfiguration,
    charts: Vec<SarfChart>,
    template: Option<PathBuf>,
}

impl SarfEngine {
    /// A single chart never gets a table of contents.
    pub fn new(path: impl Into<PathBuf>, charts: Vec<SarfChart>) -> Self {
        let mut engine = Self::with_configuration(path, ChartConfiguration::default(), charts);
        if engine.charts.len() <= 1 {
            engine.configuration.omit_toc = true;
        }
        engine
    }

    pub fn with_configuration(
        path: impl Into<PathBuf>,
        configuration: ChartConfiguration,
        charts: Vec<SarfChart>,
    ) -> Self {
        SarfEngine {
            path: path.into(),
            configuration,
            charts,
            template: None,
        }
    }

    pub fn from_sarf_kabeers(path: impl Into<PathBuf>, sarf_kabeers: Vec<SarfKabeer>) -> Self {
        let charts = sarf_kabeers.into_iter().map(SarfChart::from_sarf_kabeer).collect();
        Self::new(path, charts)
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn configuration(&self) -> &ChartConfiguration {
        &self.configuration
    }

    fn wants_toc(&self) -> bool {
        self.charts.len() > 1
            && !self.configuration.omit_toc
            && !self.configuration.omit_abbreviated_conjugation
    }

    /// Builds the document in memory. Charts that fail are reported and
    /// skipped; the rest of the batch is still converted.
    pub fn build_document(&self) -> (Document, ConversionReport) {
        let mut document = Document::default();
        let mut report = ConversionReport::default();
        if self.charts.is_empty() {
            return (document, report);
        }

        let mut ctx = BuildContext::new();
        if self.wants_toc() {
            document.add_paragraph(toc_section_break());
            document.add_paragraph(toc());
            document.add_paragraph(second_section_break());
            report.toc = true;
        }

        for (index, chart) in self.charts.iter().enumerate() {
            let name = chart.describe();
            log::debug!("Converting chart {index}: {name}");
            let result = MainConjugation::new(chart, Some(&self.configuration))
                .convert(&mut document, &mut ctx);
            if let Err(e) = &result {
                log::error!("Skipping chart {index} ({name}): {e}");
            }
            report.outcomes.push(ChartOutcome { index, chart: name, result });
        }
        (document, report)
    }

    /// Builds and saves the document. Only a failure to write is fatal.
    pub fn convert(&self) -> Result<ConversionReport, Error> {
        log::info!("Building {} chart(s) into {}", self.charts.len(), self.path.display());
        let (document, report) = self.build_document();
        docx::write(&self.path, &document, self.template.as_deref())?;
        log::info!(
            "Wrote {} ({} of {} chart(s) converted)",
            self.path.display(),
            report.converted(),
            report.outcomes.len()
        );
        Ok(report)
    }

    /// Runs [`convert`](Self::convert) on a worker thread and waits for it.
    /// Every failure, including a panic, is logged and reported as `false`.
    pub fn execute(&self) -> bool {
        let joined = std::thread::scope(|scope| {
            std::thread::Builder::new()
                .name("sarf-engine".into())
                .spawn_scoped(scope, || self.convert())
                .map(|handle| handle.join())
        });
        let result = match joined {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(Error::Worker(panic_message(panic.as_ref()))),
            Err(e) => Err(Error::Io(e)),
        };
        match result {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to write {}: {e}", self.path.display());
                false
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn toc_tab(position: u32) -> TabStop {
    TabStop { alignment: Alignment::Right, dot_leader: true, position }
}

/// Ends the leading single-column section.
fn toc_section_break() -> Paragraph {
    Paragraph {
        style: Some(ARABIC_TOC_STYLE),
        tabs: vec![toc_tab(9350)],
        section: Some(SectionProperties::continuous(None)),
        ..Default::default()
    }
}

pub(crate) fn toc_instruction() -> String {
    format!(r#"TOC \o "1-3" \h \z \t "{ARABIC_HEADING_STYLE},1""#)
}

fn toc() -> Paragraph {
    let mark_properties = RunProperties {
        fonts: Some(RunFonts { east_asia_theme: Some("minorEastAsia"), ..Default::default() }),
        no_proof: true,
        size: Some(22),
        lang: Some("en-US"),
        ..Default::default()
    };
    Paragraph {
        style: Some(ARABIC_TOC_STYLE),
        tabs: vec![toc_tab(3600)],
        mark_properties,
        ..Default::default()
    }
    .add_run(Run::field_char(FieldCharType::Begin, true))
    .add_run(Run::instr_text(toc_instruction()))
    .add_run(Run::field_char(FieldCharType::Separate, false))
    .add_run(Run::field_char(FieldCharType::End, false))
}

/// Ends the two-column section holding the TOC.
fn second_section_break() -> Paragraph {
    Paragraph {
        section: Some(SectionProperties::continuous(Some(2))),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::sarf::SarfSagheer;

    fn sagheer_chart() -> SarfChart {
        SarfChart { sarf_sagheer: Some(SarfSagheer::default()), ..Default::default() }
    }

    #[test]
    fn single_chart_forces_toc_off() {
        let engine = SarfEngine::new("out.docx", vec![sagheer_chart()]);
        assert!(engine.configuration().omit_toc);
        let (doc, report) = engine.build_document();
        assert!(!report.toc);
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn several_charts_get_toc_paragraphs() {
        let engine = SarfEngine::new("out.docx", vec![sagheer_chart(), sagheer_chart()]);
        let (doc, report) = engine.build_document();
        assert!(report.toc);
        assert_eq!(doc.blocks.len(), 5);
        let Block::Paragraph(toc) = &doc.blocks[1] else {
            panic!("expected TOC paragraph");
        };
        assert_eq!(toc.style, Some(ARABIC_TOC_STYLE));
        let Block::Paragraph(second) = &doc.blocks[2] else {
            panic!("expected section break");
        };
        assert_eq!(second.section.as_ref().and_then(|s| s.columns), Some(2));
    }

    #[test]
    fn omitted_abbreviated_section_has_no_toc() {
        let config = ChartConfiguration { omit_abbreviated_conjugation: true, ..Default::default() };
        let charts = vec![SarfChart::from_sarf_kabeer(SarfKabeer::default()); 2];
        let (_, report) = SarfEngine::with_configuration("out.docx", config, charts).build_document();
        assert!(!report.toc);
    }

    #[test]
    fn failing_chart_is_reported_and_skipped() {
        let charts = vec![sagheer_chart(), SarfChart::default(), sagheer_chart()];
        let config = ChartConfiguration { omit_toc: true, ..Default::default() };
        let (doc, report) = SarfEngine::with_configuration("out.docx", config, charts).build_document();
        assert_eq!(doc.tables().count(), 2);
        assert_eq!(report.converted(), 2);
        let failed: Vec<usize> = report.failures().map(|o| o.index).collect();
        assert_eq!(failed, vec![1]);
    }

    #[test]
    fn bookmarks_are_unique_across_charts() {
        let charts = vec![sagheer_chart(), sagheer_chart(), sagheer_chart()];
        let (doc, _) = SarfEngine::new("out.docx", charts).build_document();
        let ids: Vec<u32> = doc
            .tables()
            .flat_map(|t| t.rows.iter())
            .flat_map(|r| r.cells.iter())
            .flat_map(|c| c.paragraphs.iter())
            .flat_map(|p| p.content.iter())
            .filter_map(|i| match i {
                crate::model::Inline::BookmarkStart { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn no_charts_builds_empty_document() {
        let (doc, report) = SarfEngine::new("out.docx", Vec::new()).build_document();
        assert!(doc.blocks.is_empty());
        assert!(report.outcomes.is_empty());
    }
}
