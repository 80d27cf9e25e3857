use adslot_domain::{Channel, DispatchOutcome, DispatchResult, RecipientKind, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResultDTO {
    pub booking_id: ID,
    pub recipient: RecipientKind,
    pub channel: Channel,
    pub outcome: String,
    pub reason: Option<String>,
}

impl DispatchResultDTO {
    pub fn new(result: DispatchResult) -> Self {
        let (outcome, reason) = match result.outcome {
            DispatchOutcome::Sent => ("sent".to_string(), None),
            DispatchOutcome::AlreadySent => ("already_sent".to_string(), None),
            DispatchOutcome::Failed(reason) => ("failed".to_string(), Some(reason)),
        };
        Self {
            booking_id: result.booking_id,
            recipient: result.recipient,
            channel: result.channel,
            outcome,
            reason,
        }
    }
}
