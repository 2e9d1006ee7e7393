use std::fmt;

use serde::Serialize;

use crate::types::ActuatorStep;

/// Actuator steps sharing one onset time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleEntry {
    /// ms after stroke start
    pub onset: f32,
    pub steps: Vec<ActuatorStep>,
}

/// Time-ordered mapping from onset (ms after stroke start) to the physical
/// actuator steps triggered at that time.
///
/// Construction is additive only: steps are appended, never removed or
/// changed. Steps sharing an onset keep their insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `step` to the bucket of `onset`, creating it if needed.
    pub fn insert(&mut self, onset: f32, step: ActuatorStep) {
        match self
            .entries
            .binary_search_by(|e| e.onset.total_cmp(&onset))
        {
            Ok(i) => self.entries[i].steps.push(step),
            Err(i) => self.entries.insert(
                i,
                ScheduleEntry {
                    onset,
                    steps: vec![step],
                },
            ),
        }
    }

    /// Buckets in increasing onset order.
    pub fn iter(&self) -> impl Iterator<Item = (f32, &[ActuatorStep])> {
        self.entries.iter().map(|e| (e.onset, e.steps.as_slice()))
    }

    /// Steps triggered exactly at `onset`.
    pub fn steps_at(&self, onset: f32) -> Option<&[ActuatorStep]> {
        self.entries
            .binary_search_by(|e| e.onset.total_cmp(&onset))
            .ok()
            .map(|i| self.entries[i].steps.as_slice())
    }

    /// Number of distinct onsets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of actuator steps over all onsets
    pub fn step_count(&self) -> usize {
        self.entries.iter().map(|e| e.steps.len()).sum()
    }

    /// Time at which the last actuator stops, in ms after stroke start.
    pub fn end_time(&self) -> f32 {
        self.triggers()
            .iter()
            .map(|(onset, step)| onset + step.duration)
            .fold(0.0, f32::max)
    }

    /// Steps running at `time_ms`, i.e. with `onset <= time_ms < onset + duration`.
    ///
    /// This is what a driver polls on every tick of its clock.
    pub fn active_at(&self, time_ms: f32) -> Vec<(f32, ActuatorStep)> {
        let started = self.entries.partition_point(|e| e.onset <= time_ms);
        self.entries[..started]
            .iter()
            .flat_map(|e| e.steps.iter().map(move |s| (e.onset, *s)))
            .filter(|(onset, s)| time_ms < onset + s.duration)
            .collect()
    }

    /// Flattened `(onset, step)` pairs in schedule order.
    pub fn triggers(&self) -> Vec<(f32, ActuatorStep)> {
        self.entries
            .iter()
            .flat_map(|e| e.steps.iter().map(move |s| (e.onset, *s)))
            .collect()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (onset, step) in self.triggers() {
            writeln!(f, "{:>9.2}ms  {}", onset, step)?;
        }
        Ok(())
    }
}
