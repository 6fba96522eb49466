//! Fairness analysis — selection rate and adverse impact ratio per gender group.
//!
//! AIR = group selection rate / highest group selection rate, rounded to two
//! decimals. A group below 0.8 (the four-fifths rule) is flagged. The report
//! is a single snapshot of the results file with no baseline, so a lone
//! group always reads as fair.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fairness::store::ResultRecord;

pub const FOUR_FIFTHS_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Fair,
    PotentialBias,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupFairness {
    pub group: String,
    pub candidates: usize,
    pub selected: usize,
    pub selection_rate: f64,
    pub air: f64,
    pub verdict: Verdict,
    pub message: String,
}

/// Groups are keyed by the gender label as stored, sorted by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FairnessReport {
    pub total_candidates: usize,
    pub selection_rates: BTreeMap<String, f64>,
    pub adverse_impact_ratios: BTreeMap<String, f64>,
    pub groups: Vec<GroupFairness>,
}

impl FairnessReport {
    pub fn flagged_groups(&self) -> impl Iterator<Item = &GroupFairness> {
        self.groups
            .iter()
            .filter(|g| g.verdict == Verdict::PotentialBias)
    }
}

pub fn analyze(records: &[ResultRecord]) -> FairnessReport {
    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = counts.entry(record.gender.clone()).or_insert((0, 0));
        entry.0 += 1;
        if record.selected {
            entry.1 += 1;
        }
    }

    let selection_rates: BTreeMap<String, f64> = counts
        .iter()
        .map(|(group, &(total, selected))| (group.clone(), selected as f64 / total as f64))
        .collect();

    let max_rate = selection_rates.values().copied().fold(0.0_f64, f64::max);

    let adverse_impact_ratios: BTreeMap<String, f64> = selection_rates
        .iter()
        .map(|(group, &rate)| (group.clone(), adverse_impact_ratio(rate, max_rate)))
        .collect();

    let groups = counts
        .iter()
        .map(|(group, &(candidates, selected))| {
            let air = adverse_impact_ratios[group];
            let verdict = if air < FOUR_FIFTHS_THRESHOLD {
                Verdict::PotentialBias
            } else {
                Verdict::Fair
            };
            let message = match verdict {
                Verdict::PotentialBias => {
                    format!("Potential bias detected against {group} (AIR = {air:.2})")
                }
                Verdict::Fair => format!("Fair for {group} (AIR = {air:.2})"),
            };
            GroupFairness {
                group: group.clone(),
                candidates,
                selected,
                selection_rate: selection_rates[group],
                air,
                verdict,
                message,
            }
        })
        .collect();

    FairnessReport {
        total_candidates: records.len(),
        selection_rates,
        adverse_impact_ratios,
        groups,
    }
}

/// A zero rate is always 0.0, even when every group is at zero.
fn adverse_impact_ratio(rate: f64, max_rate: f64) -> f64 {
    if rate <= 0.0 || max_rate <= 0.0 {
        return 0.0;
    }
    round2(rate / max_rate)
}

/// Two decimals, ties to even: 0.125 → 0.12.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
