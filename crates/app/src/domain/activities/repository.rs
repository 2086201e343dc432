//! Activities repository port.
//!
//! Each lookup answers with the configuration valid at `point_in_time`;
//! activities outside their time window are reported as not found.

use async_trait::async_trait;
use bookshop::activities::{
    Activity, ActivityId, ActivityKind, bundle::BundleActivity, tiered_flat::TieredFlatActivity,
    tiered_percentage::TieredPercentageActivity,
};
use jiff::Timestamp;
use mockall::automock;

use crate::domain::RepositoryError;

/// Read access to activity configurations by kind.
#[automock]
#[async_trait]
pub trait ActivitiesRepository: Send + Sync {
    /// Find a tiered percentage activity valid at `point_in_time`.
    async fn find_tiered_percentage(
        &self,
        activity: &ActivityId,
        point_in_time: Timestamp,
    ) -> Result<Option<TieredPercentageActivity>, RepositoryError>;

    /// Find a tiered flat amount activity valid at `point_in_time`.
    async fn find_tiered_flat(
        &self,
        activity: &ActivityId,
        point_in_time: Timestamp,
    ) -> Result<Option<TieredFlatActivity>, RepositoryError>;

    /// Find a bundle activity valid at `point_in_time`.
    async fn find_bundle(
        &self,
        activity: &ActivityId,
        point_in_time: Timestamp,
    ) -> Result<Option<BundleActivity>, RepositoryError>;
}

/// Find an activity of the given kind valid at `point_in_time`.
///
/// # Errors
///
/// Returns [`RepositoryError`] when the underlying lookup fails.
pub async fn find_activity(
    repository: &dyn ActivitiesRepository,
    kind: ActivityKind,
    activity: &ActivityId,
    point_in_time: Timestamp,
) -> Result<Option<Activity>, RepositoryError> {
    Ok(match kind {
        ActivityKind::TieredPercentage => repository
            .find_tiered_percentage(activity, point_in_time)
            .await?
            .map(Activity::from),
        ActivityKind::TieredFlatAmount => repository
            .find_tiered_flat(activity, point_in_time)
            .await?
            .map(Activity::from),
        ActivityKind::Bundle => repository
            .find_bundle(activity, point_in_time)
            .await?
            .map(Activity::from),
    })
}
