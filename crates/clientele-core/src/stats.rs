//! Small aggregation helpers shared by insights and charts
//!
//! Rankings are stable: values with equal counts keep the order in which
//! they first appear, so the same dataset always produces the same output.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// A category value and how many rows carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Count occurrences, most frequent first
pub fn value_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `n` most frequent values
pub fn top_n<'a, I>(values: I, n: usize) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = value_counts(values);
    counts.truncate(n);
    counts
}

/// Most frequent value
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(values).into_iter().next().map(|vc| vc.value)
}

/// Distinct values in first-seen order
pub fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Mean, maximum and minimum of a monetary column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoneySummary {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Summarize amounts; `None` when there are none
///
/// Non-finite amounts are an error rather than silently poisoning the mean.
pub fn money_summary<I>(values: I) -> Result<Option<MoneySummary>>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut total = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for value in values {
        if !value.is_finite() {
            return Err(Error::Analysis(format!(
                "valor_servico contém valor não numérico: {}",
                value
            )));
        }
        count += 1;
        total += value;
        max = max.max(value);
        min = min.min(value);
    }

    if count == 0 {
        return Ok(None);
    }

    Ok(Some(MoneySummary {
        count,
        mean: total / count as f64,
        max,
        min,
    }))
}
