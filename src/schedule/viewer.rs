//! The user a projection or queue is computed for
//!
//! Role and name are passed explicitly rather than read from session state
//! so that every engine call stays a pure function of its arguments.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Viewer role
///
/// Uses snake_case naming to match the stored role vocabulary.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Sees every task
    admin,
    /// Sees only tasks assigned to them
    #[default]
    member,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::admin),
            "member" | "user" => Ok(Role::member),
            _ => Err(format!(
                "Invalid role '{}'. Valid options are: admin, member",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub role: Role,
    pub name: String,
}

impl Viewer {
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            role: Role::admin,
            name: name.into(),
        }
    }

    pub fn member(name: impl Into<String>) -> Self {
        Self {
            role: Role::member,
            name: name.into(),
        }
    }

    /// Check whether a task with the given assignee is visible to this viewer
    ///
    /// Assignee names compare case-insensitively, ignoring surrounding spaces.
    pub fn can_see(&self, assignee: Option<&str>) -> bool {
        match self.role {
            Role::admin => true,
            Role::member => assignee
                .map(|a| a.trim().eq_ignore_ascii_case(self.name.trim()))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_everything() {
        let viewer = Viewer::admin("root");
        assert!(viewer.can_see(Some("alice")));
        assert!(viewer.can_see(None));
    }

    #[test]
    fn test_member_sees_own_tasks() {
        let viewer = Viewer::member("Alice");
        assert!(viewer.can_see(Some(" alice ")));
        assert!(!viewer.can_see(Some("bob")));
        assert!(!viewer.can_see(None));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::member));
        assert!("guest".parse::<Role>().is_err());
    }
}
