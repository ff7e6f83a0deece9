use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use url::form_urlencoded;

pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

macro_rules! work_status {
    ($name:ident, $pg_type:tt) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "backend", derive(sqlx::Type))]
        #[cfg_attr(feature = "backend", sqlx(type_name = $pg_type, rename_all = "lowercase"))]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            Pending,
            Doing,
            Completed,
            Paused,
            Deleted,
        }

        impl $name {
            pub const ALL: [Self; 5] = [
                Self::Pending,
                Self::Doing,
                Self::Completed,
                Self::Paused,
                Self::Deleted,
            ];

            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::Pending => "pending",
                    Self::Doing => "doing",
                    Self::Completed => "completed",
                    Self::Paused => "paused",
                    Self::Deleted => "deleted",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|status| status.as_str() == s)
                    .ok_or_else(|| crate::Error::with_details(
                        crate::ErrorCode::InvalidInput,
                        "Invalid status",
                        s,
                    ))
            }
        }

    };
}

work_status!(ProjectStatus, "project_status");
work_status!(TaskStatus, "task_status");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientSchema {
    pub company: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
pub struct ClientPublic {
    pub id: i32,
    pub company: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientList {
    pub clients: Vec<ClientPublic>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSchema {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
pub struct ProjectPublic {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectList {
    pub projects: Vec<ProjectPublic>,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSchema {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
pub struct TaskPublic {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskList {
    pub tasks: Vec<TaskPublic>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterPage {
    pub offset: i64,
    pub limit: i64,
}

impl Default for FilterPage {
    fn default() -> Self {
        Self { offset: DEFAULT_OFFSET, limit: DEFAULT_LIMIT }
    }
}

impl FilterPage {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: offset.unwrap_or(DEFAULT_OFFSET),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    fn push_pairs(&self, query: &mut form_urlencoded::Serializer<'_, String>) {
        if self.offset != DEFAULT_OFFSET {
            query.append_pair("offset", &self.offset.to_string());
        }
        if self.limit != DEFAULT_LIMIT {
            query.append_pair("limit", &self.limit.to_string());
        }
    }

    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        self.push_pairs(&mut query);
        query.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectFilter {
    #[serde(flatten)]
    pub page: FilterPage,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        self.page.push_pairs(&mut query);
        append_text(&mut query, "title", self.title.as_deref());
        append_text(&mut query, "description", self.description.as_deref());
        if let Some(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        query.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskFilter {
    #[serde(flatten)]
    pub page: FilterPage,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
}

impl TaskFilter {
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        self.page.push_pairs(&mut query);
        append_text(&mut query, "title", self.title.as_deref());
        append_text(&mut query, "description", self.description.as_deref());
        if let Some(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        append_text(&mut query, "assigned_to", self.assigned_to.as_deref());
        query.finish()
    }
}

// Empty strings count as "no filter", same as the backend.
fn append_text(query: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        query.append_pair(key, value);
    }
}

/// Joins a path and an already-encoded query string.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
