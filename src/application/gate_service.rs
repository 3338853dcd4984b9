//! Gate action flow: validate the ticket, then deposit the command
//!
//! The deposit happens only after a successful, observed `Authorized`
//! response. A request that fails or times out on validation never
//! touches the gate register.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::GateCommandChannel;
use crate::domain::{Authorization, DomainError, DomainResult, GateAction, TicketValidator};

pub struct GateService {
    validator: Arc<dyn TicketValidator>,
    channel: Arc<GateCommandChannel>,
}

impl GateService {
    pub fn new(validator: Arc<dyn TicketValidator>, channel: Arc<GateCommandChannel>) -> Self {
        Self { validator, channel }
    }

    /// Authorize `booking_id` for `action` and, on success, deposit an
    /// `OPEN` command for `gate_id`. Returns the user-facing message.
    pub async fn request_gate_action(
        &self,
        gate_id: &str,
        action: GateAction,
        booking_id: &str,
    ) -> DomainResult<String> {
        match self.validator.authorize(booking_id, action).await {
            Authorization::Authorized => {
                self.channel.deposit(gate_id, booking_id).await?;
                info!(gate_id, booking_id, action = action.as_str(), "gate action authorized");
                Ok(match action {
                    GateAction::Entry => "Entry authorized. Gate is opening.".to_string(),
                    GateAction::Exit => "Exit authorized. Thank you!".to_string(),
                })
            }
            Authorization::Rejected { reason } => {
                warn!(gate_id, booking_id, action = action.as_str(), reason = %reason, "gate action rejected");
                Err(DomainError::ValidationRejected(reason))
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GateCommand;
    use crate::infrastructure::store::InMemoryRecordStore;
    use async_trait::async_trait;

    struct AcceptAll;

    #[async_trait]
    impl TicketValidator for AcceptAll {
        async fn authorize(&self, _booking_id: &str, _action: GateAction) -> Authorization {
            Authorization::Authorized
        }
    }

    struct RejectAll;

    #[async_trait]
    impl TicketValidator for RejectAll {
        async fn authorize(&self, _booking_id: &str, _action: GateAction) -> Authorization {
            Authorization::Rejected {
                reason: "not valid".into(),
            }
        }
    }

    fn service(validator: Arc<dyn TicketValidator>) -> (GateService, Arc<GateCommandChannel>) {
        let channel = Arc::new(GateCommandChannel::new(Arc::new(
            InMemoryRecordStore::new(),
        )));
        (GateService::new(validator, channel.clone()), channel)
    }

    #[tokio::test]
    async fn authorized_entry_deposits_open() {
        let (svc, channel) = service(Arc::new(AcceptAll));
        let message = svc
            .request_gate_action("G1", GateAction::Entry, "SPAB12")
            .await
            .unwrap();
        assert_eq!(message, "Entry authorized. Gate is opening.");

        let polled = channel.poll_and_consume("G1").await.unwrap();
        assert_eq!(polled.command, GateCommand::Open);
        assert_eq!(polled.booking_id.as_deref(), Some("SPAB12"));
    }

    #[tokio::test]
    async fn authorized_exit_has_exit_message() {
        let (svc, _) = service(Arc::new(AcceptAll));
        let message = svc
            .request_gate_action("G1", GateAction::Exit, "SPAB12")
            .await
            .unwrap();
        assert_eq!(message, "Exit authorized. Thank you!");
    }

    #[tokio::test]
    async fn rejection_never_deposits() {
        let (svc, channel) = service(Arc::new(RejectAll));
        let err = svc
            .request_gate_action("G1", GateAction::Entry, "SPXYZ00")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationRejected(_)));

        // no gate-open side effect on rejection
        let polled = channel.poll_and_consume("G1").await.unwrap();
        assert_eq!(polled.command, GateCommand::None);
    }
}
