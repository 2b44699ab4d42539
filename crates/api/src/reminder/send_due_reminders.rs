use crate::shared::usecase::UseCase;
use nudge_domain::{DueReminder, PushMessage};
use nudge_infra::{IReminderRepo, NudgeContext};
use tracing::{error, warn};

/// Executes one sweep cycle: select every reminder whose due time has
/// elapsed, derive a push message per reminder, submit the messages to
/// the push gateway in provider sized chunks and finally retire the
/// swept reminders from storage.
///
/// Each chunk is attempted on its own. A chunk the gateway rejects or
/// times out is logged and the remaining chunks are still submitted.
/// Reconciliation deletes the full due set regardless of per-chunk
/// outcome, so a notification can be dropped but a reminder is never
/// re-sent on the next cycle. Delivery is at-most-once.
#[derive(Debug)]
pub struct SendDueRemindersUseCase;

#[derive(Debug, PartialEq)]
pub struct SweepReport {
    /// Size of the due set this cycle
    pub due: usize,
    /// Chunks submitted to the gateway
    pub chunks: usize,
    /// Chunks that were rejected or timed out
    pub failed_chunks: usize,
    /// Reminders removed by reconciliation
    pub deleted: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

fn to_push_messages(due_reminders: &[DueReminder]) -> Vec<PushMessage> {
    due_reminders
        .iter()
        .filter_map(|due| match PushMessage::from_due_reminder(due) {
            Some(message) => Some(message),
            None => {
                // Should not happen as every user is created with a
                // token, but an unaddressable reminder must never reach
                // the gateway
                warn!(
                    "Dropping reminder with id: {} because its owner has no push token",
                    due.reminder.id
                );
                None
            }
        })
        .collect()
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = SweepReport;
    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due_reminders = ctx.repos.reminders.find_due(now).await;
        if due_reminders.is_empty() {
            return Ok(SweepReport {
                due: 0,
                chunks: 0,
                failed_chunks: 0,
                deleted: 0,
            });
        }

        let messages = to_push_messages(&due_reminders);

        let mut chunks = 0;
        let mut failed_chunks = 0;
        for chunk in messages.chunks(ctx.config.expo.chunk_size) {
            chunks += 1;
            match ctx.push_gateway.send_chunk(chunk).await {
                Ok(tickets) => {
                    let rejected = tickets.iter().filter(|t| t.status == "error").count();
                    if rejected > 0 {
                        warn!("Push gateway rejected {} messages in chunk", rejected);
                    }
                }
                Err(e) => {
                    failed_chunks += 1;
                    error!("Error submitting push message chunk to gateway: {:?}", e);
                }
            }
        }

        // Reconciliation of the original due set, exactly once and only
        // after every chunk has been attempted
        let reminder_ids = due_reminders
            .iter()
            .map(|due| due.reminder.id.clone())
            .collect::<Vec<_>>();
        let deleted = ctx
            .repos
            .reminders
            .delete_many(&reminder_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .deleted_count;

        Ok(SweepReport {
            due: due_reminders.len(),
            chunks,
            failed_chunks,
            deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use nudge_domain::{Reminder, User};
    use nudge_infra::{IPushGateway, IUserRepo, ISys, PushTicket};
    use std::sync::{Arc, Mutex};

    struct StaticTimeSys {
        now: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    /// Records the size of every submitted chunk and optionally fails
    /// one call to simulate a gateway outage
    struct StubPushGateway {
        chunk_sizes: Mutex<Vec<usize>>,
        fail_on_call: Option<usize>,
    }

    impl StubPushGateway {
        fn new(fail_on_call: Option<usize>) -> Arc<Self> {
            Arc::new(Self {
                chunk_sizes: Mutex::new(vec![]),
                fail_on_call,
            })
        }
    }

    #[async_trait::async_trait]
    impl IPushGateway for StubPushGateway {
        async fn send_chunk(&self, messages: &[PushMessage]) -> anyhow::Result<Vec<PushTicket>> {
            let mut chunk_sizes = self.chunk_sizes.lock().unwrap();
            chunk_sizes.push(messages.len());
            if self.fail_on_call == Some(chunk_sizes.len()) {
                anyhow::bail!("Gateway unavailable");
            }
            Ok(messages
                .iter()
                .map(|_| PushTicket {
                    status: "ok".into(),
                    id: Some("ticket-id".into()),
                    message: None,
                    details: None,
                })
                .collect())
        }
    }

    async fn setup(now: i64, chunk_size: usize, gateway: Arc<StubPushGateway>) -> NudgeContext {
        let mut ctx = NudgeContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { now });
        ctx.config.expo.chunk_size = chunk_size;
        ctx.push_gateway = gateway;
        ctx
    }

    async fn insert_reminders(ctx: &NudgeContext, count: usize, remind_at: i64) -> User {
        let user = User::new("device-token".into());
        ctx.repos.users.insert(&user).await.expect("To insert user");
        for i in 0..count {
            let reminder = Reminder::new(user.id.clone(), format!("Reminder {}", i), remind_at);
            ctx.repos
                .reminders
                .insert(&reminder)
                .await
                .expect("To insert reminder");
        }
        user
    }

    #[actix_web::test]
    async fn empty_due_set_skips_the_gateway() {
        let gateway = StubPushGateway::new(None);
        let ctx = setup(1000, 3, gateway.clone()).await;
        // Only future reminders
        insert_reminders(&ctx, 2, 1001).await;

        let report = execute(SendDueRemindersUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(
            report,
            SweepReport {
                due: 0,
                chunks: 0,
                failed_chunks: 0,
                deleted: 0
            }
        );
        assert!(gateway.chunk_sizes.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn future_reminders_are_left_alone() {
        let gateway = StubPushGateway::new(None);
        let ctx = setup(1000, 3, gateway.clone()).await;
        let user = insert_reminders(&ctx, 1, 1000).await;
        let future = Reminder::new(user.id.clone(), "Later".into(), 1001);
        ctx.repos.reminders.insert(&future).await.unwrap();

        let report = execute(SendDueRemindersUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(report.due, 1);
        assert_eq!(report.deleted, 1);

        let remaining = ctx.repos.reminders.find_by_user(&user.id).await;
        assert_eq!(remaining, vec![future]);
    }

    #[actix_web::test]
    async fn batches_due_reminders_into_provider_sized_chunks() {
        let gateway = StubPushGateway::new(None);
        let ctx = setup(1000, 3, gateway.clone()).await;
        let user = insert_reminders(&ctx, 7, 500).await;

        let report = execute(SendDueRemindersUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(
            report,
            SweepReport {
                due: 7,
                chunks: 3,
                failed_chunks: 0,
                deleted: 7
            }
        );
        assert_eq!(*gateway.chunk_sizes.lock().unwrap(), vec![3, 3, 1]);
        assert!(ctx.repos.reminders.find_by_user(&user.id).await.is_empty());
    }

    #[actix_web::test]
    async fn failed_chunk_does_not_stop_dispatch_or_reconciliation() {
        let gateway = StubPushGateway::new(Some(2));
        let ctx = setup(1000, 3, gateway.clone()).await;
        let user = insert_reminders(&ctx, 7, 500).await;

        let report = execute(SendDueRemindersUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(
            report,
            SweepReport {
                due: 7,
                chunks: 3,
                failed_chunks: 1,
                deleted: 7
            }
        );
        // The chunk after the failing one was still attempted
        assert_eq!(*gateway.chunk_sizes.lock().unwrap(), vec![3, 3, 1]);
        // And every reminder of the due set was reconciled
        assert!(ctx.repos.reminders.find_by_user(&user.id).await.is_empty());
    }
}
