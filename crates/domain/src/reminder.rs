use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How far into the past an occurrence may lie and still count as upcoming.
/// Tolerates the dispatcher firing slightly late without dropping reminders.
pub const DISPATCH_GRACE_MILLIS: i64 = 5 * 60 * 1000;

/// Rolling window inside which a `(booking, recipient, channel)` reminder is
/// sent at most once.
pub const LEDGER_SUPPRESSION_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeUnit {
    Minutes,
    Hours,
    Days,
}

/// A reminder lead time, e.g. "2 hours before the placement occurs".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTime {
    pub amount: i64,
    pub unit: LeadTimeUnit,
}

impl LeadTime {
    pub fn in_minutes(&self) -> i64 {
        match self.unit {
            LeadTimeUnit::Minutes => self.amount,
            LeadTimeUnit::Hours => self.amount * 60,
            LeadTimeUnit::Days => self.amount * 60 * 24,
        }
    }
}

impl Default for LeadTime {
    fn default() -> Self {
        Self {
            amount: 1,
            unit: LeadTimeUnit::Days,
        }
    }
}

impl Display for LeadTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.unit {
            LeadTimeUnit::Minutes => "minute",
            LeadTimeUnit::Hours => "hour",
            LeadTimeUnit::Days => "day",
        };
        if self.amount == 1 {
            write!(f, "1 {}", unit)
        } else {
            write!(f, "{} {}s", self.amount, unit)
        }
    }
}

/// Whether occurrence instant `occurrence` falls inside the reminder window
/// `(now - grace, now + lead]`. An occurrence exactly `lead` minutes out is
/// due; one just past the grace bound is not.
pub fn is_due(occurrence: i64, now: i64, lead_minutes: i64) -> bool {
    let diff = occurrence - now;
    diff > -DISPATCH_GRACE_MILLIS && diff <= lead_minutes * 60 * 1000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientKind {
    Operator,
    Advertiser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
}

/// A recipient's notification settings. Operator recipients are stored rows;
/// the advertiser recipient is derived per booking (its lead time comes from
/// the booking itself, its address from the advertiser contact).
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPreference {
    pub id: ID,
    pub recipient: RecipientKind,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub lead_time: LeadTime,
}

impl Entity for NotificationPreference {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl NotificationPreference {
    pub fn enabled_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.email_enabled {
            channels.push(Channel::Email);
        }
        if self.sms_enabled {
            channels.push(Channel::Sms);
        }
        channels
    }

    pub fn address_for(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Email => self.email_address.as_deref(),
            Channel::Sms => self.phone_number.as_deref(),
        }
    }
}

/// One sent reminder. Entries are append-only and queried by
/// `(booking, recipient, channel)` to enforce the 24h at-most-once rule.
/// A booking that recurs daily still gets at most one reminder per recipient
/// kind per rolling window, there is no per-occurrence bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderLedgerEntry {
    pub id: ID,
    pub booking_id: ID,
    pub recipient: RecipientKind,
    pub channel: Channel,
    pub sent_at: i64,
}

impl Entity for ReminderLedgerEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Sent,
    AlreadySent,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub booking_id: ID,
    pub recipient: RecipientKind,
    pub channel: Channel,
    pub outcome: DispatchOutcome,
}

/// Structured outcome of one dispatch run. The run itself always completes,
/// individual send failures are carried here instead of aborting it.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub results: Vec<DispatchResult>,
}

impl DispatchReport {
    pub fn sent_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == DispatchOutcome::Sent)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, DispatchOutcome::Failed(_)))
            .count()
    }
}
