//! Typed GitLab webhook payloads.
//!
//! Only the fields the bridge reads are modelled. Each type is built from the
//! decoded JSON body with `TryFrom<&serde_json::Value>`, which checks every
//! required field and reports the dotted path of the first one that is missing
//! or has the wrong type. Unknown fields are ignored.

use serde_json::{Map, Value};

use crate::TranslateError;

/// Prefix GitLab puts in front of branch names in `ref`.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

// ---------------------------------------------------------------------------
// Hook classification
// ---------------------------------------------------------------------------

/// The webhook kinds the bridge translates, keyed by the `X-Gitlab-Event` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// `Push Hook`: commits pushed to a branch.
    Push,
    /// `Pipeline Hook`: a CI pipeline changed status.
    Pipeline,
}

impl HookKind {
    /// Classifies an `X-Gitlab-Event` header value.
    ///
    /// Matching is exact, as GitLab always sends the canonical spelling.
    pub fn from_header(value: &str) -> Result<Self, TranslateError> {
        match value {
            "Push Hook" => Ok(HookKind::Push),
            "Pipeline Hook" => Ok(HookKind::Pipeline),
            other => Err(TranslateError::UnsupportedEventKind {
                kind: other.to_string(),
            }),
        }
    }

    /// Returns the header value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Push => "Push Hook",
            HookKind::Pipeline => "Pipeline Hook",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Push Hook
// ---------------------------------------------------------------------------

/// One commit listed in a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA.
    pub id: String,
}

/// The parts of a `Push Hook` body the bridge uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushHook {
    /// `user_name`: display name of the pusher.
    pub user_name: String,
    /// `project.git_http_url`: HTTP clone URL.
    pub repo_url: String,
    /// Branch name derived from `ref` with [`BRANCH_REF_PREFIX`] removed.
    pub branch: String,
    /// `commits`, in the order GitLab listed them.
    pub commits: Vec<Commit>,
}

impl TryFrom<&Value> for PushHook {
    type Error = TranslateError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        let root = as_object(body, "body")?;

        let user_name = required_str(root, "", "user_name")?.to_string();
        let project = as_object(required(root, "", "project")?, "project")?;
        let repo_url = required_str(project, "project", "git_http_url")?.to_string();
        let branch = branch_from_ref(required_str(root, "", "ref")?)?;

        let commits = as_array(required(root, "", "commits")?, "commits")?
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let path = format!("commits[{index}]");
                let commit = as_object(value, &path)?;
                Ok::<_, TranslateError>(Commit {
                    id: required_str(commit, &path, "id")?.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            user_name,
            repo_url,
            branch,
            commits,
        })
    }
}

/// Extracts the branch name from a push `ref`.
///
/// Only branch pushes are translated. Tag refs (`refs/tags/..`) and any other
/// ref namespace are rejected, as is a bare `refs/heads/` with no name.
pub fn branch_from_ref(git_ref: &str) -> Result<String, TranslateError> {
    match git_ref.strip_prefix(BRANCH_REF_PREFIX) {
        Some(branch) if !branch.is_empty() => Ok(branch.to_string()),
        Some(_) => Err(TranslateError::invalid("ref", "names no branch")),
        None => Err(TranslateError::invalid(
            "ref",
            format!("must start with '{BRANCH_REF_PREFIX}' (got '{git_ref}')"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Pipeline Hook
// ---------------------------------------------------------------------------

/// The parts of a `Pipeline Hook` body the bridge uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineHook {
    /// `object_attributes.id`, rendered as text.
    ///
    /// GitLab sends an integer; a string id is accepted as-is.
    pub id: String,
    /// `object_attributes.status`, e.g. `running`, `success`, `failed`.
    pub status: String,
}

impl PipelineHook {
    /// Returns the status when it is a terminal outcome worth reporting
    /// (`success` or `failed`), otherwise `None`.
    pub fn finished_outcome(&self) -> Option<&str> {
        match self.status.as_str() {
            "success" | "failed" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl TryFrom<&Value> for PipelineHook {
    type Error = TranslateError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        let root = as_object(body, "body")?;
        let attributes = as_object(
            required(root, "", "object_attributes")?,
            "object_attributes",
        )?;

        let id = match required(attributes, "object_attributes", "id")? {
            Value::Number(n) => n.to_string(),
            Value::String(s) if !s.is_empty() => s.clone(),
            _ => {
                return Err(TranslateError::wrong_type(
                    "object_attributes.id",
                    "a number or a non-empty string",
                ))
            }
        };
        let status = required_str(attributes, "object_attributes", "status")?.to_string();

        Ok(Self { id, status })
    }
}

// ---------------------------------------------------------------------------
// Field access helpers
// ---------------------------------------------------------------------------

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a Value, TranslateError> {
    match object.get(key) {
        Some(Value::Null) | None => Err(TranslateError::missing(join(parent, key))),
        Some(value) => Ok(value),
    }
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a str, TranslateError> {
    required(object, parent, key)?
        .as_str()
        .ok_or_else(|| TranslateError::wrong_type(join(parent, key), "a string"))
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, TranslateError> {
    value
        .as_object()
        .ok_or_else(|| TranslateError::wrong_type(path, "an object"))
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, TranslateError> {
    value
        .as_array()
        .ok_or_else(|| TranslateError::wrong_type(path, "an array"))
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
