use shared::{
    domain::{
        BenefitId, DatasetId, DeploymentId, EvaluationId, InitiativeId, KpiId, MilestoneId,
        ModelId, MonitoringRecordId, PreparationStepId, ReportId, RiskId,
    },
    protocol::{
        Benefit, Dataset, Deployment, Evaluation, Initiative, Kpi, Milestone, Model,
        MonitoringRecord, PreparationStep, Report, Risk,
    },
};

pub trait Keyed {
    type Key: Copy + PartialEq;

    fn key(&self) -> Self::Key;
}

macro_rules! keyed {
    ($record:ty, $key:ty) => {
        impl Keyed for $record {
            type Key = $key;

            fn key(&self) -> Self::Key {
                self.id
            }
        }
    };
}

keyed!(Initiative, InitiativeId);
keyed!(Dataset, DatasetId);
keyed!(PreparationStep, PreparationStepId);
keyed!(Model, ModelId);
keyed!(Evaluation, EvaluationId);
keyed!(Deployment, DeploymentId);
keyed!(MonitoringRecord, MonitoringRecordId);
keyed!(Benefit, BenefitId);
keyed!(Kpi, KpiId);
keyed!(Report, ReportId);
keyed!(Risk, RiskId);
keyed!(Milestone, MilestoneId);

/// Cached entity list: replaced wholesale on fetch, appended on create,
/// replaced in place on update.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replaces the record with the same id at its current position. Records
    /// not yet cached are appended.
    pub fn upsert(&mut self, item: T) -> usize {
        match self.position(item.key()) {
            Some(index) => {
                self.items[index] = item;
                index
            }
            None => {
                self.items.push(item);
                self.items.len() - 1
            }
        }
    }

    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        let index = self.position(key)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn position(&self, key: T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn sort_by_key<K: Ord>(&mut self, f: impl FnMut(&T) -> K) {
        self.items.sort_by_key(f);
    }
}

impl<T> Collection<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(id: i64, name: &str) -> Dataset {
        Dataset {
            id: DatasetId(id),
            initiative_id: InitiativeId(1),
            name: name.to_string(),
            ..Dataset::default()
        }
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut datasets = Collection::from_items(vec![
            dataset(1, "claims"),
            dataset(2, "policies"),
            dataset(3, "payments"),
        ]);

        let index = datasets.upsert(dataset(2, "policies-v2"));

        assert_eq!(index, 1);
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets.items()[1].name, "policies-v2");
    }

    #[test]
    fn upsert_appends_unknown_record() {
        let mut datasets = Collection::from_items(vec![dataset(1, "claims")]);
        datasets.upsert(dataset(9, "new"));
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets.last().map(|d| d.id), Some(DatasetId(9)));
    }

    #[test]
    fn remove_by_id() {
        let mut datasets = Collection::from_items(vec![dataset(1, "a"), dataset(2, "b")]);
        assert!(datasets.remove(DatasetId(1)).is_some());
        assert!(datasets.remove(DatasetId(1)).is_none());
        assert_eq!(datasets.len(), 1);
    }
}
