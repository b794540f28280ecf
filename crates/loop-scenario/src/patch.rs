//! Multi-collection patch sets
//!
//! A [`PatchSet`] is what a scenario produces: at most one
//! [`CollectionPatch`] per collection, validated as a whole before any of it
//! is applied.

use crate::error::PatchError;
use loop_metrics::trigger_spike;
use loop_model::{
    ChaosExperiment, CollectionKind, DatabaseQuery, Dataset, Incident, MetricKind, RcaData,
    Remediation, Service, ServiceStatus,
};
use rand::Rng;
use std::collections::HashSet;

/// Field updates for one service
///
/// Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceUpdate {
    /// New status
    pub status: Option<ServiceStatus>,
    /// New latency (ms)
    pub latency: Option<f64>,
    /// New error rate (%)
    pub error_rate: Option<f64>,
    /// New risk score
    pub risk_score: Option<u8>,
    /// New uptime (%)
    pub uptime: Option<f64>,
    /// New CPU utilisation (%)
    pub cpu: Option<f64>,
}

impl ServiceUpdate {
    /// Create empty update
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// With latency
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency: f64) -> Self {
        self.latency = Some(latency);
        self
    }

    /// With error rate
    #[inline]
    #[must_use]
    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    /// With risk score, clamped to 100
    #[inline]
    #[must_use]
    pub fn with_risk_score(mut self, risk_score: u8) -> Self {
        self.risk_score = Some(risk_score.min(100));
        self
    }

    /// With uptime
    #[inline]
    #[must_use]
    pub fn with_uptime(mut self, uptime: f64) -> Self {
        self.uptime = Some(uptime);
        self
    }

    /// With CPU utilisation
    #[inline]
    #[must_use]
    pub fn with_cpu(mut self, cpu: f64) -> Self {
        self.cpu = Some(cpu);
        self
    }

    /// Write the set fields into `service`
    pub fn apply(&self, service: &mut Service) {
        if let Some(status) = self.status {
            service.status = status;
        }
        if let Some(latency) = self.latency {
            service.latency = latency;
        }
        if let Some(error_rate) = self.error_rate {
            service.error_rate = error_rate;
        }
        if let Some(risk_score) = self.risk_score {
            service.risk_score = risk_score;
        }
        if let Some(uptime) = self.uptime {
            service.uptime = uptime;
        }
        if let Some(cpu) = self.cpu {
            service.cpu = cpu;
        }
    }
}

/// Transform applied to a metric series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricPatch {
    /// Raise the trailing points by up to `magnitude`
    Spike {
        /// Upper bound of the added value
        magnitude: f64,
    },
}

/// Update for a single collection
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionPatch {
    /// Per-service field updates, keyed by service id
    UpdateServices(Vec<(String, ServiceUpdate)>),
    /// New incident at the head of the list
    PrependIncident(Incident),
    /// New remediation at the head of the list
    PrependRemediation(Remediation),
    /// New chaos experiment at the head of the list
    PrependChaosExperiment(ChaosExperiment),
    /// New database query finding at the head of the list
    PrependDatabaseQuery(DatabaseQuery),
    /// Transform one metric series
    Metric {
        /// Series to transform
        kind: MetricKind,
        /// Transform
        patch: MetricPatch,
    },
    /// Replace the root-cause analysis wholesale
    ReplaceRca(RcaData),
}

impl CollectionPatch {
    /// Collection this patch writes
    #[must_use]
    pub fn collection(&self) -> CollectionKind {
        match self {
            Self::UpdateServices(_) => CollectionKind::Services,
            Self::PrependIncident(_) => CollectionKind::Incidents,
            Self::PrependRemediation(_) => CollectionKind::Remediations,
            Self::PrependChaosExperiment(_) => CollectionKind::ChaosExperiments,
            Self::PrependDatabaseQuery(_) => CollectionKind::DatabaseQueries,
            Self::Metric { kind, .. } => CollectionKind::for_metric(*kind),
            Self::ReplaceRca(_) => CollectionKind::RcaData,
        }
    }

    fn validate(&self, dataset: &Dataset) -> Result<(), PatchError> {
        let duplicate = |id: &str| PatchError::DuplicateId {
            collection: self.collection(),
            id: id.to_string(),
        };

        match self {
            Self::UpdateServices(updates) => {
                let mut seen = HashSet::new();
                for (id, _) in updates {
                    if dataset.service(id).is_none() {
                        return Err(PatchError::UnknownService(id.clone()));
                    }
                    if !seen.insert(id.as_str()) {
                        return Err(PatchError::DuplicateService(id.clone()));
                    }
                }
            }
            Self::PrependIncident(incident) => {
                if dataset.incidents.iter().any(|i| i.id == incident.id) {
                    return Err(duplicate(&incident.id));
                }
            }
            Self::PrependRemediation(remediation) => {
                if dataset.remediations.iter().any(|r| r.id == remediation.id) {
                    return Err(duplicate(&remediation.id.to_string()));
                }
            }
            Self::PrependChaosExperiment(experiment) => {
                if dataset.chaos_experiments.iter().any(|c| c.id == experiment.id) {
                    return Err(duplicate(&experiment.id));
                }
            }
            Self::PrependDatabaseQuery(_) | Self::Metric { .. } | Self::ReplaceRca(_) => {}
        }
        Ok(())
    }

    fn apply<R: Rng + ?Sized>(self, dataset: &mut Dataset, rng: &mut R) {
        match self {
            Self::UpdateServices(updates) => {
                for (id, update) in &updates {
                    if let Some(service) = dataset.services.iter_mut().find(|s| &s.id == id) {
                        update.apply(service);
                    }
                }
            }
            Self::PrependIncident(incident) => dataset.incidents.insert(0, incident),
            Self::PrependRemediation(remediation) => dataset.remediations.insert(0, remediation),
            Self::PrependChaosExperiment(experiment) => {
                dataset.chaos_experiments.insert(0, experiment);
            }
            Self::PrependDatabaseQuery(query) => dataset.database_queries.insert(0, query),
            Self::Metric { kind, patch } => match patch {
                MetricPatch::Spike { magnitude } => {
                    trigger_spike(dataset.metrics.get_mut(kind), magnitude, rng);
                }
            },
            Self::ReplaceRca(rca) => dataset.rca_data = rca,
        }
    }
}

/// Set of collection patches applied as a unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchSet {
    patches: Vec<CollectionPatch>,
}

impl PatchSet {
    /// Create empty patch set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an additional patch
    #[inline]
    #[must_use]
    pub fn with(mut self, patch: CollectionPatch) -> Self {
        self.patches.push(patch);
        self
    }

    /// Add a patch
    #[inline]
    pub fn push(&mut self, patch: CollectionPatch) {
        self.patches.push(patch);
    }

    /// Patches in application order
    #[inline]
    #[must_use]
    pub fn patches(&self) -> &[CollectionPatch] {
        &self.patches
    }

    /// Collections touched, in application order
    #[must_use]
    pub fn collections(&self) -> Vec<CollectionKind> {
        self.patches.iter().map(CollectionPatch::collection).collect()
    }

    /// Whether `kind` is touched
    #[inline]
    #[must_use]
    pub fn touches(&self, kind: CollectionKind) -> bool {
        self.patches.iter().any(|p| p.collection() == kind)
    }

    /// Number of patches
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Check the whole set against `dataset` without modifying it
    ///
    /// # Errors
    /// Returns the first [`PatchError`] found
    pub fn validate(&self, dataset: &Dataset) -> Result<(), PatchError> {
        let mut seen = HashSet::new();
        for patch in &self.patches {
            let kind = patch.collection();
            if !seen.insert(kind) {
                return Err(PatchError::DuplicateCollection(kind));
            }
            patch.validate(dataset)?;
        }
        Ok(())
    }

    /// Validate, then apply every patch to `dataset`
    ///
    /// Returns the touched collections in application order. On error the
    /// dataset is unchanged.
    ///
    /// # Errors
    /// Returns the first [`PatchError`] found during validation
    pub fn apply<R: Rng + ?Sized>(
        self,
        dataset: &mut Dataset,
        rng: &mut R,
    ) -> Result<Vec<CollectionKind>, PatchError> {
        self.validate(dataset)?;

        let touched = self.collections();
        for patch in self.patches {
            let kind = patch.collection();
            patch.apply(dataset, rng);
            tracing::debug!(collection = %kind, "applied collection patch");
        }
        Ok(touched)
    }
}

impl FromIterator<CollectionPatch> for PatchSet {
    fn from_iter<I: IntoIterator<Item = CollectionPatch>>(iter: I) -> Self {
        Self {
            patches: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline;
    use loop_model::{IncidentStatus, RemediationStatus, RemediationType, Severity};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn incident(id: &str) -> Incident {
        Incident {
            id: id.to_string(),
            title: "test".into(),
            severity: Severity::Low,
            status: IncidentStatus::Active,
            service: "cdn-edge".into(),
            started_at: "Just now".into(),
            resolved_at: None,
            mttr: None,
            auto_remediated: false,
            root_cause: None,
        }
    }

    #[test]
    fn service_update_only_touches_set_fields() {
        let mut dataset = baseline::dataset_with_seed(1);
        let before = dataset.service("svc-3").cloned().unwrap();

        PatchSet::new()
            .with(CollectionPatch::UpdateServices(vec![(
                "svc-3".into(),
                ServiceUpdate::new().with_status(ServiceStatus::Critical),
            )]))
            .apply(&mut dataset, &mut StdRng::seed_from_u64(0))
            .unwrap();

        let after = dataset.service("svc-3").unwrap();
        assert_eq!(after.status, ServiceStatus::Critical);
        assert_eq!(after.latency, before.latency);
        assert_eq!(after.risk_score, before.risk_score);
    }

    #[test]
    fn risk_score_is_clamped() {
        let update = ServiceUpdate::new().with_risk_score(250);
        assert_eq!(update.risk_score, Some(100));
    }

    #[test]
    fn prepend_keeps_most_recent_first() {
        let mut dataset = baseline::dataset_with_seed(1);
        let original = dataset.incidents.clone();

        PatchSet::new()
            .with(CollectionPatch::PrependIncident(incident("inc-new")))
            .apply(&mut dataset, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(dataset.incidents[0].id, "inc-new");
        assert_eq!(&dataset.incidents[1..], &original[..]);
    }

    #[test]
    fn duplicate_collection_is_rejected_without_changes() {
        let mut dataset = baseline::dataset_with_seed(1);
        let before = dataset.clone();

        let result = PatchSet::new()
            .with(CollectionPatch::PrependIncident(incident("inc-a")))
            .with(CollectionPatch::PrependIncident(incident("inc-b")))
            .apply(&mut dataset, &mut StdRng::seed_from_u64(0));

        assert_eq!(
            result,
            Err(PatchError::DuplicateCollection(CollectionKind::Incidents))
        );
        assert_eq!(dataset, before);
    }

    #[test]
    fn unknown_service_is_rejected_without_changes() {
        let mut dataset = baseline::dataset_with_seed(1);
        let before = dataset.clone();

        let result = PatchSet::new()
            .with(CollectionPatch::ReplaceRca(before.rca_data.clone()))
            .with(CollectionPatch::UpdateServices(vec![(
                "svc-404".into(),
                ServiceUpdate::new().with_latency(1.0),
            )]))
            .apply(&mut dataset, &mut StdRng::seed_from_u64(0));

        assert_eq!(result, Err(PatchError::UnknownService("svc-404".into())));
        assert_eq!(dataset, before);
    }

    #[test]
    fn repeated_service_update_is_rejected_without_changes() {
        let mut dataset = baseline::dataset_with_seed(1);
        let before = dataset.clone();

        let result = PatchSet::new()
            .with(CollectionPatch::UpdateServices(vec![
                ("svc-2".into(), ServiceUpdate::new().with_latency(100.0)),
                ("svc-1".into(), ServiceUpdate::new().with_latency(200.0)),
                ("svc-2".into(), ServiceUpdate::new().with_latency(300.0)),
            ]))
            .apply(&mut dataset, &mut StdRng::seed_from_u64(0));

        assert_eq!(result, Err(PatchError::DuplicateService("svc-2".into())));
        assert_eq!(dataset, before);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dataset = baseline::dataset_with_seed(1);

        let patch = PatchSet::new().with(CollectionPatch::PrependIncident(incident("inc-1")));
        assert!(matches!(
            patch.validate(&dataset),
            Err(PatchError::DuplicateId { .. })
        ));

        let patch = PatchSet::new().with(CollectionPatch::PrependRemediation(Remediation {
            id: 1,
            action: "again".into(),
            target: "redis-cache".into(),
            status: RemediationStatus::Ready,
            kind: RemediationType::Restart,
            time: "Now".into(),
            reason: "test".into(),
        }));
        assert!(matches!(
            patch.validate(&dataset),
            Err(PatchError::DuplicateId { collection: CollectionKind::Remediations, .. })
        ));
    }

    #[test]
    fn metric_spike_touches_only_its_series() {
        let mut dataset = baseline::dataset_with_seed(1);
        let before = dataset.clone();

        let touched = PatchSet::new()
            .with(CollectionPatch::Metric {
                kind: MetricKind::Latency,
                patch: MetricPatch::Spike { magnitude: 600.0 },
            })
            .apply(&mut dataset, &mut StdRng::seed_from_u64(2))
            .unwrap();

        assert_eq!(touched, vec![CollectionKind::LatencyMetrics]);
        assert_eq!(dataset.metrics.cpu, before.metrics.cpu);
        assert_eq!(dataset.metrics.error_rate, before.metrics.error_rate);
        assert_eq!(dataset.metrics.latency.len(), before.metrics.latency.len());
    }

    #[test]
    fn collect_from_iterator() {
        let set: PatchSet = vec![
            CollectionPatch::PrependIncident(incident("inc-x")),
            CollectionPatch::ReplaceRca(baseline::rca_data()),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert!(set.touches(CollectionKind::RcaData));
        assert!(!set.touches(CollectionKind::Services));
    }

    fn arb_patch() -> impl Strategy<Value = CollectionPatch> {
        let service_id = prop_oneof![
            (1u8..=10).prop_map(|n| format!("svc-{n}")),
            Just("svc-404".to_string()),
        ];
        prop_oneof![
            prop::collection::vec((service_id, 0.0f64..2000.0), 1..4).prop_map(|updates| {
                CollectionPatch::UpdateServices(
                    updates
                        .into_iter()
                        .map(|(id, latency)| (id, ServiceUpdate::new().with_latency(latency)))
                        .collect(),
                )
            }),
            prop_oneof![Just("inc-1"), Just("inc-fresh")]
                .prop_map(|id| CollectionPatch::PrependIncident(incident(id))),
            (0.0f64..5000.0).prop_map(|magnitude| CollectionPatch::Metric {
                kind: MetricKind::Latency,
                patch: MetricPatch::Spike { magnitude },
            }),
            Just(CollectionPatch::ReplaceRca(baseline::rca_data())),
        ]
    }

    proptest! {
        #[test]
        fn prop_apply_is_all_or_nothing(
            patches in prop::collection::vec(arb_patch(), 0..5),
            seed in any::<u64>(),
        ) {
            let mut dataset = baseline::dataset_with_seed(1);
            let before = dataset.clone();
            let set: PatchSet = patches.into_iter().collect();
            let expected = set.collections();

            match set.apply(&mut dataset, &mut StdRng::seed_from_u64(seed)) {
                Ok(touched) => {
                    prop_assert_eq!(&touched, &expected);
                    for kind in before.changed_collections(&dataset) {
                        prop_assert!(expected.contains(&kind));
                    }
                }
                Err(_) => {
                    prop_assert_eq!(dataset, before);
                }
            }
        }
    }
}
