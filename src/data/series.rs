//! Date-indexed rate series.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::RateObservation;

/// The `{date -> rate}` series re-derived from the filtered rate table.
///
/// Iteration follows source row order; nothing is sorted. When the source
/// repeats a date, lookups return the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct RateSeries {
    observations: Vec<RateObservation>,
    index: HashMap<NaiveDate, usize>,
}

impl RateSeries {
    pub fn new(observations: Vec<RateObservation>) -> Self {
        let mut index = HashMap::with_capacity(observations.len());
        for (pos, obs) in observations.iter().enumerate() {
            index.entry(obs.date).or_insert(pos);
        }
        Self { observations, index }
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.index.get(&date).map(|&pos| self.observations[pos].rate)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    pub fn observations(&self) -> &[RateObservation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest and latest dates present, regardless of source order.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.observations.iter().map(|o| o.date).min()?;
        let max = self.observations.iter().map(|o| o.date).max()?;
        Some((min, max))
    }
}
