//! Authorization module for planner-core.
//!
//! Provides named-policy authorization for the schedule pages:
//! - `UserContext` describes the current user as resolved by the host
//! - `AuthorizationService` evaluates a named policy against that user
//! - `PolicyAuthorizationService` is a table of policies built from config

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};

/// Name of the policy that grants admin features on the schedule page
pub const ADMIN_POLICY: &str = "Admin";

/// The user a request is made on behalf of
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    /// User name, `None` for anonymous requests
    pub name: Option<String>,
    /// Roles asserted by the identity provider
    pub roles: BTreeSet<String>,
}

impl UserContext {
    /// An unauthenticated user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated user without roles
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            roles: BTreeSet::new(),
        }
    }

    /// Add a role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// User name, empty for anonymous users
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Evaluates named policies for a user
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Whether `user` satisfies `policy`
    async fn authorize(&self, user: &UserContext, policy: &str) -> Result<bool>;
}

/// Requirements of a single policy.
///
/// A policy is satisfied by an authenticated user who either has one of
/// `roles` or is listed in `users`. With both lists empty any authenticated
/// user satisfies it.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub roles: BTreeSet<String>,
    pub users: BTreeSet<String>,
}

impl Policy {
    fn is_satisfied_by(&self, user: &UserContext) -> bool {
        if !user.is_authenticated() {
            return false;
        }
        if self.roles.is_empty() && self.users.is_empty() {
            return true;
        }
        self.users.contains(user.name()) || !self.roles.is_disjoint(&user.roles)
    }
}

/// Policy table keyed by policy name
#[derive(Debug, Clone, Default)]
pub struct PolicyAuthorizationService {
    policies: HashMap<String, Policy>,
}

impl PolicyAuthorizationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a policy
    pub fn with_policy(mut self, name: impl Into<String>, policy: Policy) -> Self {
        self.policies.insert(name.into(), policy);
        self
    }

    /// Policy table with the "Admin" policy granted to `role` and `users`
    pub fn admin(role: Option<&str>, users: impl IntoIterator<Item = String>) -> Self {
        let policy = Policy {
            roles: role.map(|r| r.to_string()).into_iter().collect(),
            users: users.into_iter().collect(),
        };
        Self::new().with_policy(ADMIN_POLICY, policy)
    }
}

#[async_trait]
impl AuthorizationService for PolicyAuthorizationService {
    async fn authorize(&self, user: &UserContext, policy: &str) -> Result<bool> {
        let policy_def = self
            .policies
            .get(policy)
            .ok_or_else(|| Error::UnknownPolicy(policy.to_string()))?;
        Ok(policy_def.is_satisfied_by(user))
    }
}
