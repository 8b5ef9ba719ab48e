//! Stations and the trains standing at them.

use std::collections::BTreeMap;

use super::{Kind, StationName, Train, TrainNumber, YardError};

/// A train standing at a station, as the station sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub number: TrainNumber,
    pub kind: Kind,
}

/// A named location tracking which trains are present, in arrival order.
///
/// The station does not stop a train being present at two stations at
/// once; the yard's move protocol does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    name: StationName,
    present: Vec<Presence>,
}

impl Station {
    pub fn new(name: StationName) -> Self {
        Self {
            name,
            present: Vec::new(),
        }
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    /// Record a train's arrival.
    ///
    /// Arriving twice is a no-op. Returns `true` if the train was not
    /// already present.
    pub fn train_arrived(&mut self, train: &Train) -> bool {
        if self.is_present(train.number().as_str()) {
            return false;
        }
        self.present.push(Presence {
            number: train.number().clone(),
            kind: train.kind(),
        });
        true
    }

    /// Send a train on its way, keeping the others in arrival order.
    pub fn send_train(&mut self, number: &str) -> Result<Presence, YardError> {
        let index = self
            .present
            .iter()
            .position(|p| p.number.as_str() == number)
            .ok_or_else(|| {
                YardError::not_found("train at station", format!("{number} at {}", self.name))
            })?;
        Ok(self.present.remove(index))
    }

    pub fn is_present(&self, number: &str) -> bool {
        self.present.iter().any(|p| p.number.as_str() == number)
    }

    /// Trains present, in arrival order.
    pub fn trains(&self) -> &[Presence] {
        &self.present
    }

    /// Numbers of the trains of `kind`, in arrival order.
    pub fn trains_of_kind(&self, kind: Kind) -> Vec<&TrainNumber> {
        self.present
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| &p.number)
            .collect()
    }

    /// Number of trains present per kind. Kinds with no trains are absent.
    pub fn counts_by_kind(&self) -> BTreeMap<Kind, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.present {
            *counts.entry(p.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}
