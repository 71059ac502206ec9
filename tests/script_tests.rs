use std::sync::Mutex;

use async_trait::async_trait;
use teloxide::types::ChatId;

use z1_gray_bot::bot::flow::script::{run_script, step_a, step_b, step_c, ScriptIds};
use z1_gray_bot::services::sequencer::{
    DeliveryChannel, DeliveryError, MessageFormat, MessageRef, TimedMessage, TYPING_THRESHOLD,
};

const UNLOCK_URL: &str = "https://example.com/unlock";

fn test_ids() -> ScriptIds {
    ScriptIds::generate(123_456_789, "test-salt")
}

#[test]
fn generated_ids_have_script_shapes() {
    let ids = test_ids();
    assert!(ids.node_id.starts_with("USR-"));
    assert!(ids.slot_id.starts_with("SLT-"));
    assert!(ids.access_key.starts_with("AKY-"));
    assert_eq!(ids.sync_seed.len(), 4);
    assert!((24.5..=49.5).contains(&ids.integrity));
    // The node id is the one identifier that must be reproducible.
    assert_eq!(ids.node_id, ScriptIds::generate(123_456_789, "test-salt").node_id);
}

#[test]
fn steps_have_the_scripted_shape() {
    let ids = test_ids();
    let (a, b, c) = (step_a(&ids), step_b(&ids), step_c(&ids, UNLOCK_URL));

    assert_eq!(a.len(), 3);
    assert_eq!(b.len(), 3);
    assert_eq!(c.len(), 3);

    for message in a.iter().chain(&b).chain(&c) {
        assert_eq!(message.formatting, MessageFormat::Html);
        assert!(message.show_typing);
        assert!(!message.delay_before.is_zero());
    }
}

#[test]
fn identifiers_appear_where_the_script_displays_them() {
    let ids = test_ids();

    assert!(step_a(&ids)[2].text.contains(&ids.node_id));
    let b = step_b(&ids);
    assert!(b[1].text.contains(&ids.slot_id));
    assert!(b[2].text.contains(&ids.slot_id));
    let c = step_c(&ids, UNLOCK_URL);
    assert!(c[0].text.contains(&ids.access_key));
    assert!(c[0].text.contains(&ids.sync_seed));
}

#[test]
fn only_the_timer_message_carries_the_unlock_button() {
    let ids = test_ids();
    let c = step_c(&ids, UNLOCK_URL);

    let with_action: Vec<_> = step_a(&ids)
        .iter()
        .chain(&step_b(&ids))
        .chain(&c)
        .filter(|m| m.action.is_some())
        .cloned()
        .collect();
    assert_eq!(with_action.len(), 1);

    let action = c[1].action.as_ref().unwrap();
    assert_eq!(action.url, UNLOCK_URL);
    assert!(action.label.contains("$49"));
}

#[test]
fn timer_and_gateway_delays_clear_the_typing_threshold() {
    let ids = test_ids();
    for message in step_c(&ids, UNLOCK_URL) {
        assert!(message.delay_before > TYPING_THRESHOLD);
    }
}

/// Counts sends; can be told to reject everything as an invalid target.
#[derive(Default)]
struct CountingChannel {
    sent: Mutex<Vec<String>>,
    target_dead: bool,
}

#[async_trait]
impl DeliveryChannel for CountingChannel {
    async fn send_typing(&self, _target: ChatId) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn send_message(
        &self,
        _target: ChatId,
        message: &TimedMessage,
    ) -> Result<MessageRef, DeliveryError> {
        if self.target_dead {
            return Err(DeliveryError::TargetInvalid("chat not found".into()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.text.clone());
        Ok(MessageRef(sent.len() as i32))
    }
}

#[tokio::test(start_paused = true)]
async fn full_script_delivers_all_nine_lines() {
    let channel = CountingChannel::default();
    let ids = test_ids();

    let report = run_script(&channel, ChatId(1), &ids, UNLOCK_URL).await;

    assert_eq!(report.delivered, 9);
    assert_eq!(report.failed, 0);
    assert!(!report.target_lost);
    assert_eq!(channel.sent.lock().unwrap().len(), 9);
}

#[tokio::test(start_paused = true)]
async fn script_stops_early_when_the_chat_is_gone() {
    let channel = CountingChannel {
        target_dead: true,
        ..CountingChannel::default()
    };
    let ids = test_ids();

    let report = run_script(&channel, ChatId(1), &ids, UNLOCK_URL).await;

    assert!(report.target_lost);
    assert_eq!(report.delivered, 0);
    // The whole first batch is marked failed, later batches never start.
    assert_eq!(report.failed, 3);
}
