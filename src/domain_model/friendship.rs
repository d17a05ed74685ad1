//! Friendship state for an unordered pair of users.
//!
//! A pair is either absent (no relationship), pending in one direction, or
//! confirmed. Transitions are pure functions of the current state so the
//! storage layer only has to swap one value atomically.

use crate::domain_model::{UserId, UserPair};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipState {
    /// `min -> max` is waiting for `max` to answer.
    PendingForward,
    /// `max -> min` is waiting for `min` to answer.
    PendingReverse,
    Confirmed,
}

impl FriendshipState {
    /// Pending state for a request sent by `requester` within `pair`.
    pub fn pending_from(pair: UserPair, requester: UserId) -> Self {
        if requester == pair.min() {
            FriendshipState::PendingForward
        } else {
            FriendshipState::PendingReverse
        }
    }

    pub fn requester(&self, pair: UserPair) -> Option<UserId> {
        match self {
            FriendshipState::PendingForward => Some(pair.min()),
            FriendshipState::PendingReverse => Some(pair.max()),
            FriendshipState::Confirmed => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, FriendshipState::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipState::PendingForward => "pending_forward",
            FriendshipState::PendingReverse => "pending_reverse",
            FriendshipState::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for FriendshipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FriendshipState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending_forward" => Ok(Self::PendingForward),
            "pending_reverse" => Ok(Self::PendingReverse),
            "confirmed" => Ok(Self::Confirmed),
            _ => anyhow::bail!("unknown friendship state: {}", s),
        }
    }
}

/// Directed view of a stored pair, as the rest of the system reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FriendshipEdge {
    pub requester: UserId,
    pub recipient: UserId,
    pub confirmed: bool,
}

impl FriendshipEdge {
    pub fn from_state(pair: UserPair, state: FriendshipState) -> Self {
        match state {
            FriendshipState::PendingForward => FriendshipEdge {
                requester: pair.min(),
                recipient: pair.max(),
                confirmed: false,
            },
            FriendshipState::PendingReverse => FriendshipEdge {
                requester: pair.max(),
                recipient: pair.min(),
                confirmed: false,
            },
            FriendshipState::Confirmed => FriendshipEdge {
                requester: pair.min(),
                recipient: pair.max(),
                confirmed: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Changed { next: Option<FriendshipState> },
}

/// `from` asks `pair.other(from)` to be friends.
pub fn on_request(
    pair: UserPair,
    from: UserId,
    current: Option<FriendshipState>,
) -> Transition {
    match current {
        None => Transition::Changed {
            next: Some(FriendshipState::pending_from(pair, from)),
        },
        Some(FriendshipState::Confirmed) => Transition::Unchanged,
        Some(pending) if pending.requester(pair) == Some(from) => Transition::Unchanged,
        // the counterpart asked first
        Some(_) => Transition::Changed {
            next: Some(FriendshipState::Confirmed),
        },
    }
}

/// `from` drops `pair.other(from)`.
///
/// A confirmed friendship falls back to a request standing from the
/// counterpart; a pending request in either direction is deleted.
pub fn on_remove(
    pair: UserPair,
    from: UserId,
    current: Option<FriendshipState>,
) -> Transition {
    match current {
        None => Transition::Unchanged,
        Some(FriendshipState::Confirmed) => Transition::Changed {
            next: Some(FriendshipState::pending_from(pair, pair.other(from))),
        },
        Some(_) => Transition::Changed { next: None },
    }
}
