//! Shared toggle types used by both the service and consumer processes.
//!
//! These are the wire types: the `Toggle` snapshot exchanged over the query
//! API and the `ToggleEvent` envelope published to the message broker. Events
//! serialize as JSON with SCREAMING_CASE event names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feature toggle.
///
/// The key is unique across the system and immutable once created. Timestamps
/// are set by the durable store on write; a toggle built client-side before
/// creation carries placeholder timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toggle {
    /// Unique identifier. Lowercase alphanumeric and dashes.
    pub key: String,
    /// Whether the toggle is on. Defaults to `false` at creation.
    pub is_enabled: bool,
    /// Free-text description. May be empty.
    pub description: String,
    /// Time the toggle was created.
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    /// Time the toggle was last updated.
    #[serde(default = "epoch")]
    pub updated_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Toggle {
    /// Create a toggle with the given key and description.
    ///
    /// The toggle starts disabled with placeholder timestamps; the durable
    /// store assigns real ones on insert.
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_enabled: false,
            description: description.into(),
            created_at: epoch(),
            updated_at: epoch(),
        }
    }
}

/// State transitions a toggle can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToggleEventName {
    Created,
    Enabled,
    Disabled,
    Deleted,
}

impl ToggleEventName {
    /// The mirror value implied by this event.
    ///
    /// Only ENABLED flips a mirror entry to `true`; CREATED, DISABLED and
    /// DELETED all resolve to `false`.
    pub fn enables(self) -> bool {
        matches!(self, ToggleEventName::Enabled)
    }
}

/// An immutable state-change notification.
///
/// Events are fire-and-forget; there is no acknowledgement channel back to
/// the producer. Delivery is at-least-once and unordered across keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleEvent {
    /// What happened.
    pub name: ToggleEventName,
    /// Snapshot of the toggle at emission time.
    pub toggle: Toggle,
    /// When the event was emitted.
    pub created_at: DateTime<Utc>,
}

impl ToggleEvent {
    fn new(name: ToggleEventName, toggle: Toggle) -> Self {
        Self {
            name,
            toggle,
            created_at: Utc::now(),
        }
    }

    /// Event announcing a newly created toggle.
    pub fn created(toggle: Toggle) -> Self {
        Self::new(ToggleEventName::Created, toggle)
    }

    /// Event announcing a toggle was enabled.
    pub fn enabled(toggle: Toggle) -> Self {
        Self::new(ToggleEventName::Enabled, toggle)
    }

    /// Event announcing a toggle was disabled.
    pub fn disabled(toggle: Toggle) -> Self {
        Self::new(ToggleEventName::Disabled, toggle)
    }

    /// Event announcing a toggle was deleted.
    pub fn deleted(toggle: Toggle) -> Self {
        Self::new(ToggleEventName::Deleted, toggle)
    }
}
