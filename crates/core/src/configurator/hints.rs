//! Transient presentation hints emitted next to the pricing computations.
//!
//! Hints carry their own time-to-live; sinks decide how (or whether) to expire them.

use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "hint", rename_all = "snake_case")]
pub enum PresentationHint {
    /// A breakdown line changed because of the last interaction.
    HighlightItem { item_id: String, label: String },
    /// A recommendation surfaced that was not shown before.
    NewRecommendation { addon_id: String },
}

pub trait HintSink: Send {
    fn emit(&mut self, hint: PresentationHint, ttl: Duration);

    /// Drops pending hints, e.g. when the package changes underneath them.
    fn reset(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHints;

impl HintSink for NoopHints {
    fn emit(&mut self, _hint: PresentationHint, _ttl: Duration) {}
}

#[derive(Clone, Debug)]
pub struct TimedHint {
    pub hint: PresentationHint,
    pub issued_at: Instant,
    pub ttl: Duration,
}

impl TimedHint {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) >= self.ttl
    }
}

/// Buffers hints until they expire. A newer highlight replaces an older one of the same kind.
#[derive(Clone, Debug, Default)]
pub struct HintLog {
    active: Vec<TimedHint>,
}

impl HintLog {
    pub fn active(&self) -> impl Iterator<Item = &PresentationHint> {
        self.active.iter().map(|timed| &timed.hint)
    }

    pub fn highlighted_item(&self) -> Option<&str> {
        self.active.iter().rev().find_map(|timed| match &timed.hint {
            PresentationHint::HighlightItem { item_id, .. } => Some(item_id.as_str()),
            PresentationHint::NewRecommendation { .. } => None,
        })
    }

    pub fn new_recommendation(&self) -> Option<&str> {
        self.active.iter().rev().find_map(|timed| match &timed.hint {
            PresentationHint::NewRecommendation { addon_id } => Some(addon_id.as_str()),
            PresentationHint::HighlightItem { .. } => None,
        })
    }

    pub fn expire(&mut self, now: Instant) {
        self.active.retain(|timed| !timed.is_expired(now));
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn drain(&mut self) -> Vec<PresentationHint> {
        self.active.drain(..).map(|timed| timed.hint).collect()
    }
}

impl HintSink for HintLog {
    fn emit(&mut self, hint: PresentationHint, ttl: Duration) {
        let same_kind = std::mem::discriminant(&hint);
        self.active.retain(|timed| std::mem::discriminant(&timed.hint) != same_kind);
        self.active.push(TimedHint { hint, issued_at: Instant::now(), ttl });
    }

    fn reset(&mut self) {
        self.clear();
    }
}
