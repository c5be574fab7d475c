//! Action item records and request bodies

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Action item priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl_wire_enum_conversions!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Action item workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Open,
    Blocked,
    Done,
}

impl_wire_enum_conversions!(ItemStatus {
    Open => "open",
    Blocked => "blocked",
    Done => "done",
});

impl ItemStatus {
    /// Status after the "done" checkbox is toggled: done reopens, anything
    /// else completes.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Done => Self::Open,
            Self::Open | Self::Blocked => Self::Done,
        }
    }
}

/// Server-owned action item record
///
/// `priority` and `status` are kept as raw wire strings so values the client
/// does not know about survive a read-through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: i64,
    pub meeting_id: i64,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ActionItem {
    /// Parsed status; unknown or missing values read as `None`.
    pub fn item_status(&self) -> Option<ItemStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn is_done(&self) -> bool {
        self.item_status() == Some(ItemStatus::Done)
    }

    /// Status to send when the item's "done" checkbox is toggled.
    pub fn toggled_status(&self) -> ItemStatus {
        self.item_status().map_or(ItemStatus::Done, ItemStatus::toggled)
    }
}

/// Body of `POST /meetings/{mid}/action-items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActionItem {
    pub description: String,
    pub priority: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl NewActionItem {
    pub fn new(description: impl Into<String>, priority: Priority, status: ItemStatus) -> Self {
        Self {
            description: description.into(),
            priority: priority.to_string(),
            status: status.to_string(),
            assignee_id: None,
            due_date: None,
        }
    }
}

/// Body of `PATCH /action-items/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

impl ActionItemPatch {
    pub fn status(status: ItemStatus) -> Self {
        Self { status: Some(status.to_string()), ..Self::default() }
    }
}
