use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(UserId)
    }
}

/// Unordered pair of distinct users, stored as `(min, max)`.
///
/// Must not derive `Ord`: `Ord::min` and `Ord::max` would shadow `min()` and `max()`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UserPair(UserId, UserId);

impl UserPair {
    /// Returns `None` when both ids are the same user.
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        if a == b {
            None
        } else if a < b {
            Some(Self(a, b))
        } else {
            Some(Self(b, a))
        }
    }

    pub fn min(&self) -> UserId {
        self.0
    }

    pub fn max(&self) -> UserId {
        self.1
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.0 == user || self.1 == user
    }

    /// The member of the pair that is not `user`.
    pub fn other(&self, user: UserId) -> UserId {
        if self.0 == user { self.1 } else { self.0 }
    }
}

impl fmt::Display for UserPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

/// A user not yet stored. An empty `name` falls back to `login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    /// Checks the fields and fills in a missing display name.
    pub fn validated(mut self, today: NaiveDate) -> Result<Self, String> {
        if !self.email.contains('@') {
            return Err(format!("email {:?} is not an address", self.email));
        }
        if self.login.is_empty() || self.login.chars().any(char::is_whitespace) {
            return Err(format!("login {:?} must be non-empty without spaces", self.login));
        }
        if self.birthday.is_some_and(|birthday| birthday > today) {
            return Err("birthday is in the future".to_string());
        }
        if self.name.trim().is_empty() {
            self.name = self.login.clone();
        }
        Ok(self)
    }

    pub fn stored(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            login: self.login,
            name: self.name,
            birthday: self.birthday,
        }
    }
}
