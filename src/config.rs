use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::sarf::SarfChart;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirective {
    /// Keep insertion order.
    #[default]
    None,
    /// By root letters, then template.
    Alphabetical,
    /// By template, then root letters.
    Type,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfiguration {
    pub omit_title: bool,
    pub omit_header: bool,
    pub omit_toc: bool,
    pub omit_abbreviated_conjugation: bool,
    pub omit_detailed_conjugation: bool,
    pub sort_directive: SortDirective,
    pub sort_direction: SortDirection,
}

impl ChartConfiguration {
    pub fn comparator(&self) -> SarfChartComparator {
        SarfChartComparator::new(self.sort_directive, self.sort_direction)
    }
}

/// Orders charts by a sort directive. Charts without a header sort first in
/// ascending order and last in descending order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SarfChartComparator {
    directive: SortDirective,
    direction: SortDirection,
}

impl SarfChartComparator {
    pub fn new(directive: SortDirective, direction: SortDirection) -> Self {
        SarfChartComparator { directive, direction }
    }

    pub fn compare(&self, a: &SarfChart, b: &SarfChart) -> Ordering {
        let ordering = match self.directive {
            SortDirective::None => Ordering::Equal,
            SortDirective::Alphabetical => root_key(a)
                .cmp(&root_key(b))
                .then_with(|| template_key(a).cmp(&template_key(b))),
            SortDirective::Type => template_key(a)
                .cmp(&template_key(b))
                .then_with(|| root_key(a).cmp(&root_key(b))),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable sort; charts comparing equal keep their relative order.
    pub fn sort(&self, charts: &mut [SarfChart]) {
        charts.sort_by(|a, b| self.compare(a, b));
    }

    /// Position at which `chart` goes so that equal charts stay in arrival order.
    pub fn insertion_point(&self, charts: &[SarfChart], chart: &SarfChart) -> usize {
        charts.partition_point(|existing| self.compare(existing, chart) != Ordering::Greater)
    }
}

fn root_key(chart: &SarfChart) -> Option<Vec<char>> {
    chart
        .header
        .as_ref()
        .map(|h| h.root_letters.letters().collect())
}

fn template_key(chart: &SarfChart) -> Option<&str> {
    chart.header.as_ref().and_then(|h| h.template.as_deref())
}
