//! The Z1-Gray diagnostic script: three timed message batches ending in an
//! unlock link. All content is theater; the identifiers are fabricated by
//! [`crate::utils::ids`] and the button is a plain URL redirect.

use std::time::Duration;

use teloxide::types::ChatId;

use crate::services::sequencer::{
    send_delayed_sequence, DeliveryChannel, DeliveryOutcome, MessageSequence, TimedMessage,
};
use crate::utils::ids;

/// Pause between the step A/B/C batches.
const STEP_PAUSE: Duration = Duration::from_millis(1500);
/// Small lead-in before steps B and C.
const STEP_LEAD_IN: Duration = Duration::from_millis(200);

/// Identifiers generated once per script run and re-displayed across steps.
#[derive(Debug, Clone)]
pub struct ScriptIds {
    /// Deterministic per-user node id (`USR-…`).
    pub node_id: String,
    /// Reserved "slot" id (`SLT-…`).
    pub slot_id: String,
    /// Derived "access key" (`AKY-…`).
    pub access_key: String,
    /// Four-hex-char seed shown next to the access key.
    pub sync_seed: String,
    /// Fabricated node integrity percentage.
    pub integrity: f64,
}

impl ScriptIds {
    /// Generates the full identifier set for one run.
    pub fn generate(user_id: u64, salt: &str) -> Self {
        Self {
            node_id: ids::node_id(user_id, salt),
            slot_id: ids::script_id("SLT"),
            access_key: ids::script_id("AKY"),
            sync_seed: ids::sync_seed(),
            integrity: ids::integrity_percent(),
        }
    }
}

/// Step A: system identification and threat alert.
pub fn step_a(ids: &ScriptIds) -> MessageSequence {
    vec![
        TimedMessage::html(
            "<code>[LOG: Z1_SYS_ALERT_001]</code>\n\
             🟥🟥🟧⬜⬜ <b>[SYSTEM ALERT]</b> Node anomaly detected.",
        )
        .with_delay(Duration::from_millis(500))
        .with_typing(),
        TimedMessage::html(
            "<code>[LOG: Z1_SYS_SCAN_002]</code>\n\
             🧬📉 <code>[SCAN COMPLETE]</code> Threat level: <b>HIGH</b>.",
        )
        .with_delay(Duration::from_secs(3))
        .with_typing(),
        TimedMessage::html(format!(
            "<code>[LOG: Z1_SYS_ID_003]</code>\n🧠🆔 [NODE ID] <b>{}</b>",
            ids.node_id
        ))
        .with_delay(Duration::from_secs(3))
        .with_typing(),
    ]
}

/// Step B: diagnostic report and action mandate.
pub fn step_b(ids: &ScriptIds) -> MessageSequence {
    vec![
        TimedMessage::html(format!(
            "<code>[LOG: Z1_SYS_DIAG_004]</code>\n\
             📊🧠 [DIAGNOSTIC REPORT] <i>Critical failure</i> in node integrity.\n\
             <b>Status:</b> 🟥🟥🟥🟥🟧 (Integrity: <code>{:.1}%</code>)",
            ids.integrity
        ))
        .with_delay(Duration::from_millis(500))
        .with_typing(),
        TimedMessage::html(format!(
            "<code>[LOG: Z1_SYS_ACTION_005]</code>\n\
             ⚠️🔧 <b>[ACTION REQUIRED]</b> Immediate system intervention mandated.\n\
             <i>System override: SLOT [<code>{}</code>] secured for immediate recalibration.</i>",
            ids.slot_id
        ))
        .with_delay(Duration::from_secs(4))
        .with_typing(),
        TimedMessage::html(format!(
            "<code>[LOG: Z1_SYS_SLOT_006]</code>\n🔒🆔 [SLOT ID] <code>{}</code>",
            ids.slot_id
        ))
        .with_delay(Duration::from_secs(4))
        .with_typing(),
    ]
}

/// Step C: lock sequence, unlock button, gateway follow-up.
pub fn step_c(ids: &ScriptIds, unlock_url: &str) -> MessageSequence {
    vec![
        TimedMessage::html(format!(
            "<code>[LOG: Z1_SYS_KEY_007]</code>\n\
             🔐 Root Protocol: SYNC_SEED::<code>{}</code> → <b>KEY DERIVED</b>\n\
             🔑⏳ [ACCESS KEY] <b>{}</b>\n\
             Activation Progress: [🟩🟩🟨⬜⬜]",
            ids.sync_seed, ids.access_key
        ))
        .with_delay(Duration::from_millis(500))
        .with_typing(),
        TimedMessage::html(
            "<b>⚠️ Activation Slot Reserved</b>\n\
             Only <code>1</code> access slot remains for your Node ID.\n\n\
             <code>[LOG: Z1_SYS_TIMER_008]</code>\n\
             ⏰⚠️ [TIME REMAINING] <code>08:43 LEFT</code>\n\n\
             <b>Note:</b> Action cannot be reversed once initiated.",
        )
        .with_delay(Duration::from_millis(2500))
        .with_typing()
        .with_action("🚨 UNLOCK NOW – $49", unlock_url),
        TimedMessage::html(
            "<code>[LOG: Z1_SYS_GATEWAY_009]</code>\n\
             🔐 Secure payment gateway sequence initiated for your session...\n\
             Please complete the process on the opened page.",
        )
        .with_delay(Duration::from_millis(2500))
        .with_typing(),
    ]
}

/// What a full script run amounted to.
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Messages the channel accepted.
    pub delivered: usize,
    /// Messages that failed their single attempt.
    pub failed: usize,
    /// The chat became permanently unreachable mid-script.
    pub target_lost: bool,
}

impl ScriptReport {
    fn absorb(&mut self, outcomes: &[DeliveryOutcome]) {
        for outcome in outcomes {
            match outcome {
                DeliveryOutcome::Sent(_) => self.delivered += 1,
                DeliveryOutcome::Failed(err) => {
                    self.failed += 1;
                    if err.is_target_invalid() {
                        self.target_lost = true;
                    }
                }
            }
        }
    }
}

/// Drives the three steps against one chat, pausing between batches. Stops
/// early when the chat becomes unreachable; individual failed lines are
/// simply skipped, the user never sees an error for them.
pub async fn run_script<C>(
    channel: &C,
    chat_id: ChatId,
    ids: &ScriptIds,
    unlock_url: &str,
) -> ScriptReport
where
    C: DeliveryChannel + ?Sized,
{
    let mut report = ScriptReport::default();

    report.absorb(&send_delayed_sequence(channel, chat_id, &step_a(ids), Duration::ZERO).await);
    if report.target_lost {
        return report;
    }
    tokio::time::sleep(STEP_PAUSE).await;

    report.absorb(&send_delayed_sequence(channel, chat_id, &step_b(ids), STEP_LEAD_IN).await);
    if report.target_lost {
        return report;
    }
    tokio::time::sleep(STEP_PAUSE).await;

    report.absorb(
        &send_delayed_sequence(channel, chat_id, &step_c(ids, unlock_url), STEP_LEAD_IN).await,
    );
    report
}
