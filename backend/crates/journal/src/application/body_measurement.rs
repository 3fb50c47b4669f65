//! Body Measurement Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::body_measurement::{BodyMeasurement, NewBodyMeasurement};
use crate::domain::repository::BodyMeasurementRepository;
use crate::error::{JournalError, JournalResult};

pub struct BodyMeasurementUseCase<R>
where
    R: BodyMeasurementRepository,
{
    repo: Arc<R>,
}

impl<R> BodyMeasurementUseCase<R>
where
    R: BodyMeasurementRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: UserId) -> JournalResult<Vec<BodyMeasurement>> {
        self.repo.list_measurements(user_id).await
    }

    /// Record today's measurements, replacing any earlier ones from the same day
    pub async fn record(&self, entry: NewBodyMeasurement) -> JournalResult<BodyMeasurement> {
        let errors = entry.validate();
        if !errors.is_empty() {
            return Err(JournalError::Validation(errors));
        }

        let saved = self.repo.upsert_measurement(&entry).await?;

        tracing::info!(
            user_id = %saved.user_id,
            measured_on = %saved.measured_on,
            "Body measurement recorded"
        );
        Ok(saved)
    }
}
