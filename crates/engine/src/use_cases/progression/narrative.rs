//! Narrative events for level changes.
//!
//! Posting happens after the state change is persisted and is best-effort:
//! feed failures are logged and dropped.

use std::sync::Arc;

use guisebook_domain::{CharacterId, PendingKind, PendingRewards};

use super::types::{ActingContext, LevelAdvance, LevelRollback};
use crate::infrastructure::ports::{ChatFeed, ClockPort, NarrativeMessage};

const PENDING_LABELS: [(PendingKind, &str); 6] = [
    (PendingKind::Attributes, "Attribute"),
    (PendingKind::Skills, "Skill"),
    (PendingKind::Moves, "Move"),
    (PendingKind::SparkSlots, "Spark Slot"),
    (PendingKind::SignaturePerk, "Signature Perk"),
    (PendingKind::FinalHandDiscoverable, "Final Hand Discoverable"),
];

/// Post-commit hook that announces level changes on the chat feed.
pub struct NarrativeHook {
    feed: Arc<dyn ChatFeed>,
    clock: Arc<dyn ClockPort>,
}

impl NarrativeHook {
    pub fn new(feed: Arc<dyn ChatFeed>, clock: Arc<dyn ClockPort>) -> Self {
        Self { feed, clock }
    }

    pub async fn level_advanced(
        &self,
        ctx: &ActingContext,
        actor: CharacterId,
        name: &str,
        advance: &LevelAdvance,
    ) {
        self.publish(ctx, actor, render_advance(name, advance)).await;
    }

    pub async fn level_undone(
        &self,
        ctx: &ActingContext,
        actor: CharacterId,
        name: &str,
        rollback: &LevelRollback,
    ) {
        self.publish(ctx, actor, render_undo(name, rollback)).await;
    }

    async fn publish(&self, ctx: &ActingContext, actor: CharacterId, content: String) {
        let message = NarrativeMessage {
            speaker: ctx.speaker.clone(),
            actor,
            content,
            created_at: self.clock.now(),
        };
        if let Err(e) = self.feed.post(message).await {
            tracing::warn!(
                character_id = %actor,
                user_id = %ctx.user_id,
                error = %e,
                "Failed to post narrative event"
            );
        }
    }
}

/// `<div class="level-up">` fragment for an advance.
pub fn render_advance(name: &str, advance: &LevelAdvance) -> String {
    render_fragment(
        &format!("{} reached Level {}", name, advance.to),
        Some(&format!("Tier: {}", advance.tier)),
        &advance.grants.gain_lines(),
    )
}

/// Fragment for an undo, listing the restored pending counters.
pub fn render_undo(name: &str, rollback: &LevelRollback) -> String {
    let lines: Vec<String> = pending_lines(&rollback.pending)
        .into_iter()
        .map(|line| format!("Pending: {}", line))
        .collect();
    render_fragment(
        &format!("Level {} → {} (undone)", rollback.from, rollback.to),
        Some(name),
        &lines,
    )
}

fn pending_lines(pending: &PendingRewards) -> Vec<String> {
    PENDING_LABELS
        .iter()
        .filter_map(|(kind, label)| match pending.get(*kind) {
            0 => None,
            1 => Some(format!("1 {}", label)),
            n => Some(format!("{} {}s", n, label)),
        })
        .collect()
}

fn render_fragment(heading: &str, sub_label: Option<&str>, items: &[String]) -> String {
    let mut html = String::from("<div class=\"level-up\">");
    html.push_str(&format!("<h3>{}</h3>", escape_html(heading)));
    if let Some(sub_label) = sub_label {
        html.push_str(&format!("<p class=\"tier\">{}</p>", escape_html(sub_label)));
    }
    if !items.is_empty() {
        html.push_str("<ul>");
        for item in items {
            html.push_str(&format!("<li>{}</li>", escape_html(item)));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{FeedError, MockChatFeed};
    use chrono::{TimeZone, Utc};
    use guisebook_domain::{Level, LevelGrants, UserId};

    fn advance() -> LevelAdvance {
        LevelAdvance {
            from: Level::clamped(4),
            to: Level::clamped(5),
            tier: "veteran".into(),
            grants: LevelGrants {
                attribute_points: 1,
                skill_points: 1,
                signature_perk: 1,
                ..LevelGrants::default()
            },
            pending: PendingRewards::default(),
            guided: false,
        }
    }

    fn ctx() -> ActingContext {
        ActingContext::new(UserId::new("gm").expect("user id"), "Game Master")
    }

    #[test]
    fn advance_fragment_lists_gains() {
        let html = render_advance("Vess", &advance());

        assert_eq!(
            html,
            "<div class=\"level-up\"><h3>Vess reached Level 5</h3>\
             <p class=\"tier\">Tier: veteran</p>\
             <ul><li>+1 Attribute</li><li>+1 Skill</li><li>Signature Perk</li></ul></div>"
        );
    }

    #[test]
    fn names_are_escaped() {
        let html = render_advance("<b>Vess & co</b>", &advance());

        assert!(html.contains("&lt;b&gt;Vess &amp; co&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn undo_fragment_summarizes_restored_pending() {
        let rollback = LevelRollback {
            from: Level::clamped(3),
            to: Level::clamped(2),
            pending: PendingRewards {
                skills: 2,
                moves: 1,
                ..PendingRewards::default()
            },
        };

        let html = render_undo("Vess", &rollback);

        assert!(html.contains("<h3>Level 3 → 2 (undone)</h3>"));
        assert!(html.contains("<li>Pending: 2 Skills</li><li>Pending: 1 Move</li>"));
    }

    #[test]
    fn undo_without_pending_has_no_list() {
        let rollback = LevelRollback {
            from: Level::clamped(2),
            to: Level::clamped(1),
            pending: PendingRewards::default(),
        };

        assert!(!render_undo("Vess", &rollback).contains("<ul>"));
    }

    #[tokio::test]
    async fn feed_failures_are_swallowed() {
        let mut feed = MockChatFeed::new();
        feed.expect_post()
            .times(1)
            .returning(|_| Err(FeedError::Unavailable("offline".into())));
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).single().expect("time");
        let hook = NarrativeHook::new(Arc::new(feed), Arc::new(FixedClock(now)));

        hook.level_advanced(&ctx(), CharacterId::new(), "Vess", &advance())
            .await;
    }

    #[tokio::test]
    async fn message_carries_speaker_actor_and_time() {
        let actor = CharacterId::new();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).single().expect("time");
        let mut feed = MockChatFeed::new();
        feed.expect_post()
            .withf(move |m| m.actor == actor && m.speaker == "Game Master" && m.created_at == now)
            .times(1)
            .returning(|_| Ok(guisebook_domain::MessageId::new()));
        let hook = NarrativeHook::new(Arc::new(feed), Arc::new(FixedClock(now)));

        hook.level_advanced(&ctx(), actor, "Vess", &advance()).await;
    }
}
