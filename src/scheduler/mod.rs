/// 경매 종료 스케줄러
/// 요청 처리와 독립된 주기 작업으로, 마감이 지난 Open 작업을 찾아
/// 하나씩 종료 트랜잭션을 수행한다. 종료는 입찰 경로에서 동기적으로
/// 일어나지 않고 오직 이 스윕으로만 일어난다.
// region:    --- Imports
use crate::auction::model::Job;
use crate::error::MarketplaceResult;
use crate::notification::Notifier;
use crate::store::AuctionStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};
// endregion: --- Imports

/// 기본 실행 주기 (300초)
const DEFAULT_PERIOD: Duration = Duration::from_secs(300);

// region:    --- Auction Scheduler

/// 경매 종료 스케줄러
pub struct AuctionScheduler<S> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    period: Duration,
}

impl<S: AuctionStore + 'static> AuctionScheduler<S> {
    pub fn new(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_period(store, notifier, DEFAULT_PERIOD)
    }

    /// 실행 주기를 지정해 생성 (테스트/운영 설정용)
    pub fn with_period(store: Arc<S>, notifier: Arc<dyn Notifier>, period: Duration) -> Self {
        Self {
            store,
            notifier,
            period,
        }
    }

    /// 경매 종료 스케줄러 시작
    pub async fn start(&self) {
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let period = self.period;
        tokio::spawn(async move {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                if let Err(e) = Self::close_expired_jobs(store.as_ref(), notifier.as_ref()).await {
                    error!("{:<12} --> 종료 스윕 중 오류 발생: {:?}", "Scheduler", e);
                }
            }
        });
    }

    /// 한 번의 종료 스윕
    /// 작업 하나의 실패가 같은 스윕의 다른 작업을 막지 않으며,
    /// 실패한 작업은 다음 주기의 조회에 다시 잡혀 자연스럽게 재시도된다.
    pub async fn close_expired_jobs(store: &S, notifier: &dyn Notifier) -> MarketplaceResult<()> {
        let now = Utc::now();
        let expired_jobs = store.jobs_expired_and_open(now).await?;
        if !expired_jobs.is_empty() {
            info!(
                "{:<12} --> 마감된 작업 {}건 종료 시작",
                "Scheduler",
                expired_jobs.len()
            );
        }

        for job in expired_jobs {
            if let Err(e) = Self::close_job(store, notifier, &job).await {
                error!(
                    "{:<12} --> 작업 종료 실패 id: {}, 오류: {:?}",
                    "Scheduler", job.id, e
                );
            }
        }

        Ok(())
    }

    /// 작업 하나에 대한 종료 트랜잭션
    async fn close_job(store: &S, notifier: &dyn Notifier, job: &Job) -> MarketplaceResult<()> {
        let Some(outcome) = store.close_job(job.id).await? else {
            // 이미 다른 스윕이 종료한 경우 (멱등)
            debug!("{:<12} --> 이미 종료된 작업 id: {}", "Scheduler", job.id);
            return Ok(());
        };

        match &outcome.winning_bid {
            Some(winning_bid) => {
                info!(
                    "{:<12} --> 작업 종료 id: {}, 낙찰자: {}, 금액: {}",
                    "Scheduler", outcome.job.id, winning_bid.bidder_id, winning_bid.amount
                );

                notifier
                    .notify_winner(winning_bid.bidder_id, &outcome.job)
                    .await;

                // 낙찰자를 제외한 입찰자들에게 알림
                let mut others: Vec<i64> = store
                    .bids_for_job(outcome.job.id)
                    .await?
                    .iter()
                    .map(|b| b.bidder_id)
                    .filter(|id| *id != winning_bid.bidder_id)
                    .collect();
                others.sort_unstable();
                others.dedup();
                notifier.notify_other_bidders(&others, &outcome.job).await;
            }
            None => {
                info!(
                    "{:<12} --> 입찰 없이 작업 종료 id: {}",
                    "Scheduler", outcome.job.id
                );
            }
        }

        Ok(())
    }
}

// endregion: --- Auction Scheduler
