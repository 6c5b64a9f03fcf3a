//! TaskFilter - セッション単位のフィルタ条件
//!
//! 各条件は具体値か sentinel の "all"。JSON 上でも `"all"` として現れる。

use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{TaskPriority, TaskStatus, UserId};

const ALL: &str = "all";

/// A filter criterion: either the "all" sentinel or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue<T> {
    All,
    Only(T),
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> FilterValue<T> {
    /// `All` matches everything.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T> From<Option<T>> for FilterValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for FilterValue<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: Serialize> Serialize for FilterValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FilterValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ALL {
            return Ok(Self::All);
        }
        let de: serde::de::value::StringDeserializer<D::Error> = raw.into_deserializer();
        T::deserialize(de).map(Self::Only)
    }
}

/// Active filter criteria. `Default` is the "show everything" state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub status: FilterValue<TaskStatus>,
    pub priority: FilterValue<TaskPriority>,
    pub assigned_to: FilterValue<UserId>,
    pub search_query: String,
}

impl TaskFilter {
    /// Shallow merge: fields present in the patch replace the current ones.
    pub fn merge(&mut self, patch: TaskFilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(search_query) = patch.search_query {
            self.search_query = search_query;
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial filter update for `TaskBoard::set_filters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FilterValue<TaskStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<FilterValue<TaskPriority>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<FilterValue<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl TaskFilterPatch {
    pub fn status(mut self, status: FilterValue<TaskStatus>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: FilterValue<TaskPriority>) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn assigned_to(mut self, assigned_to: FilterValue<UserId>) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }
}
