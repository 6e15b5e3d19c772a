use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::arabic::RootLetters;
use crate::config::{ChartConfiguration, SarfChartComparator};
use crate::engine::SarfEngine;
use crate::error::Error;
use crate::sarf::{ConjugationBuilder, ConjugationRequest, ConjugationTemplate, SarfChart};

/// Collects charts, possibly from several threads, and renders them in
/// comparator order.
pub struct SarfEngineHelper {
    builder: Arc<dyn ConjugationBuilder>,
    comparator: SarfChartComparator,
    charts: Mutex<Vec<SarfChart>>,
}

impl SarfEngineHelper {
    pub fn new(builder: Arc<dyn ConjugationBuilder>) -> Self {
        Self::with_comparator(builder, SarfChartComparator::default())
    }

    pub fn with_comparator(builder: Arc<dyn ConjugationBuilder>, comparator: SarfChartComparator) -> Self {
        SarfEngineHelper {
            builder,
            comparator,
            charts: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SarfChart>> {
        self.charts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, request: &ConjugationRequest) -> Result<(), Error> {
        let chart = self.builder.do_conjugation(request)?;
        self.add_chart(chart);
        Ok(())
    }

    pub fn add_triliteral(
        &self,
        template: &str,
        root_letters: [char; 3],
        verbal_nouns: Vec<String>,
        adverbs: Vec<String>,
    ) -> Result<(), Error> {
        let [first, second, third] = root_letters;
        let mut request = ConjugationRequest::new(template, RootLetters::triliteral(first, second, third));
        request.verbal_nouns = verbal_nouns;
        request.adverbs = adverbs;
        self.add(&request)
    }

    pub fn add_quadriliteral(
        &self,
        template: &str,
        translation: Option<String>,
        root_letters: [char; 4],
        verbal_nouns: Vec<String>,
        adverbs: Vec<String>,
    ) -> Result<(), Error> {
        let [first, second, third, fourth] = root_letters;
        let mut request = ConjugationRequest::new(
            template,
            RootLetters::quadriliteral(first, second, third, fourth),
        );
        request.translation = translation;
        request.verbal_nouns = verbal_nouns;
        request.adverbs = adverbs;
        self.add(&request)
    }

    /// Adds every entry of a saved template; stops at the first failure.
    pub fn add_all(&self, template: &ConjugationTemplate) -> Result<(), Error> {
        for request in &template.data {
            self.add(request)?;
        }
        Ok(())
    }

    pub fn add_chart(&self, chart: SarfChart) {
        let mut charts = self.lock();
        let at = self.comparator.insertion_point(&charts, &chart);
        charts.insert(at, chart);
    }

    pub fn charts(&self) -> Vec<SarfChart> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn execute(&self, path: &Path) -> bool {
        self.execute_with(path, ChartConfiguration::default())
    }

    pub fn execute_with(&self, path: &Path, configuration: ChartConfiguration) -> bool {
        let snapshot = self.charts();
        Self::execute_charts(path, configuration, snapshot)
    }

    /// Re-sorts `charts` by the configuration's directive and renders them.
    pub fn execute_charts(
        path: &Path,
        configuration: ChartConfiguration,
        charts: impl IntoIterator<Item = SarfChart>,
    ) -> bool {
        let mut charts: Vec<SarfChart> = charts.into_iter().collect();
        configuration.comparator().sort(&mut charts);
        SarfEngine::with_configuration(path, configuration, charts).execute()
    }
}
