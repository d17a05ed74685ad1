use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct EventId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Like,
    Review,
    Friend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventType::Like => "LIKE",
            EventType::Review => "REVIEW",
            EventType::Friend => "FRIEND",
        };
        f.write_str(s)
    }
}

impl FromStr for EventType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "LIKE" => Ok(Self::Like),
            "REVIEW" => Ok(Self::Review),
            "FRIEND" => Ok(Self::Friend),
            _ => anyhow::bail!("unknown event type: {}", s),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Add => "ADD",
            Operation::Remove => "REMOVE",
            Operation::Update => "UPDATE",
        };
        f.write_str(s)
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "ADD" => Ok(Self::Add),
            "REMOVE" => Ok(Self::Remove),
            "UPDATE" => Ok(Self::Update),
            _ => anyhow::bail!("unknown operation: {}", s),
        }
    }
}

/// An event not yet stored. The feed assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
    pub event_type: EventType,
    pub operation: Operation,
    pub entity_id: i64,
}

impl NewEvent {
    pub fn new(user_id: UserId, event_type: EventType, operation: Operation, entity_id: i64) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id,
            event_type,
            operation,
            entity_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: EventId,
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
    pub event_type: EventType,
    pub operation: Operation,
    pub entity_id: i64,
}

impl Event {
    pub fn stored(event_id: EventId, event: NewEvent) -> Self {
        Self {
            event_id,
            timestamp: event.timestamp,
            user_id: event.user_id,
            event_type: event.event_type,
            operation: event.operation,
            entity_id: event.entity_id,
        }
    }
}
