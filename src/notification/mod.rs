// region:    --- Imports
use crate::auction::model::Job;
use async_trait::async_trait;
use tracing::debug;
// endregion: --- Imports

// region:    --- Notifier

/// 종료 트랜잭션 성공 후 호출되는 알림 훅
/// 실패하거나 종료를 지연시켜서는 안 되므로 결과를 돌려주지 않는다
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 낙찰자에게 알림
    async fn notify_winner(&self, winner_id: i64, job: &Job);

    /// 낙찰되지 못한 입찰자들에게 알림
    async fn notify_other_bidders(&self, bidder_ids: &[i64], job: &Job);
}

/// 알림 전송 구현이 아직 없는 no-op 구현체
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_winner(&self, winner_id: i64, job: &Job) {
        debug!(
            "{:<12} --> 낙찰 알림 (no-op) job: {}, winner: {}",
            "Notifier", job.id, winner_id
        );
    }

    async fn notify_other_bidders(&self, bidder_ids: &[i64], job: &Job) {
        debug!(
            "{:<12} --> 유찰 알림 (no-op) job: {}, 대상: {}명",
            "Notifier",
            job.id,
            bidder_ids.len()
        );
    }
}

// endregion: --- Notifier
