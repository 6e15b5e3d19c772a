use crate::abbreviated::AbbreviatedConjugation;
use crate::config::ChartConfiguration;
use crate::detailed::DetailedConjugation;
use crate::error::Error;
use crate::helper::BuildContext;
use crate::model::Document;
use crate::sarf::SarfChart;

/// Builds the whole chart: abbreviated table followed by the detailed one.
pub struct MainConjugation<'a> {
    sarf_chart: &'a SarfChart,
    configuration: ChartConfiguration,
}

impl<'a> MainConjugation<'a> {
    /// Sections whose model is missing are always omitted, whatever the
    /// caller asked for.
    pub fn new(sarf_chart: &'a SarfChart, configuration: Option<&ChartConfiguration>) -> Self {
        let mut configuration = configuration.cloned().unwrap_or_default();
        if sarf_chart.sarf_sagheer.is_none() {
            configuration.omit_abbreviated_conjugation = true;
        }
        if sarf_chart.sarf_kabeer.is_none() {
            configuration.omit_detailed_conjugation = true;
        }
        MainConjugation { sarf_chart, configuration }
    }

    pub fn configuration(&self) -> &ChartConfiguration {
        &self.configuration
    }

    pub fn convert(&self, document: &mut Document, ctx: &mut BuildContext) -> Result<(), Error> {
        let chart = self.sarf_chart;
        if chart.sarf_sagheer.is_none() && chart.sarf_kabeer.is_none() {
            return Err(Error::InvalidChart(format!(
                "{} has neither an abbreviated nor a detailed conjugation",
                chart.describe()
            )));
        }

        let abbreviated = chart
            .sarf_sagheer
            .as_ref()
            .filter(|_| !self.configuration.omit_abbreviated_conjugation);
        let detailed = chart
            .sarf_kabeer
            .as_ref()
            .filter(|_| !self.configuration.omit_detailed_conjugation);

        // Build both before touching the document so a bad chart leaves no
        // partial output behind.
        let abbreviated = abbreviated.map(|sagheer| {
            AbbreviatedConjugation::new(&self.configuration, sagheer, chart.header.as_ref())
                .chart(ctx)
        });
        let detailed = detailed
            .map(|kabeer| DetailedConjugation::from_sarf_kabeer(kabeer).chart())
            .transpose()?;

        if let Some(table) = abbreviated {
            document.add_table(table);
        }
        if let Some(table) = detailed {
            document.add_table(table);
        }
        Ok(())
    }
}
