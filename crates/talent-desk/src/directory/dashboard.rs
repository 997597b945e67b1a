use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ActivityStatus, CandidateStatus, Record, RecordId, RecordKind};
use super::service::{DirectoryError, DirectoryService};

pub const DEFAULT_RECENT_ACTIVITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineEntry {
    pub status: CandidateStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub kind: RecordKind,
    pub kind_label: &'static str,
    pub id: RecordId,
    pub name: String,
    pub action: ActivityAction,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub admins: CollectionStats,
    pub candidates: CollectionStats,
    pub companies: CollectionStats,
    pub candidate_pipeline: Vec<PipelineEntry>,
    pub recent_activity: Vec<ActivityEntry>,
}

fn activity<T: Record>(record: &T) -> ActivityEntry {
    let (action, at) = match record.updated_at() {
        Some(updated) => (ActivityAction::Updated, updated),
        None => (ActivityAction::Created, record.created_at()),
    };
    ActivityEntry {
        kind: T::KIND,
        kind_label: T::KIND.label(),
        id: record.id().clone(),
        name: record.display_name().to_string(),
        action,
        at,
    }
}

impl DirectoryService {
    /// Headline counts and the latest changes across all collections.
    ///
    /// Candidates count as active until rejected; admins and companies by
    /// their status flag.
    pub fn dashboard(&self, recent_limit: usize) -> Result<DashboardSummary, DirectoryError> {
        let admins = self.admins().snapshot()?;
        let candidates = self.candidates().snapshot()?;
        let companies = self.companies().snapshot()?;

        let candidate_pipeline = CandidateStatus::ALL
            .into_iter()
            .map(|status| PipelineEntry {
                status,
                status_label: status.label(),
                count: candidates
                    .iter()
                    .filter(|candidate| candidate.status == status)
                    .count(),
            })
            .collect();

        let mut recent_activity: Vec<ActivityEntry> = admins
            .iter()
            .map(activity)
            .chain(candidates.iter().map(activity))
            .chain(companies.iter().map(activity))
            .collect();
        recent_activity.sort_by(|left, right| right.at.cmp(&left.at));
        recent_activity.truncate(recent_limit);

        Ok(DashboardSummary {
            admins: CollectionStats {
                total: admins.len(),
                active: admins
                    .iter()
                    .filter(|admin| admin.status == ActivityStatus::Active)
                    .count(),
            },
            candidates: CollectionStats {
                total: candidates.len(),
                active: candidates
                    .iter()
                    .filter(|candidate| candidate.status.is_active())
                    .count(),
            },
            companies: CollectionStats {
                total: companies.len(),
                active: companies
                    .iter()
                    .filter(|company| company.status == ActivityStatus::Active)
                    .count(),
            },
            candidate_pipeline,
            recent_activity,
        })
    }
}
