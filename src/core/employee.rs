use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A person in the organisation. Identity is the id alone: two values with
/// the same id are the same employee for hashing, equality and ordering.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    id: String,
    manager_id: String,
    salary: u64,
}

impl Employee {
    pub fn new(id: impl Into<String>, manager_id: impl Into<String>, salary: u64) -> Self {
        Self {
            id: id.into(),
            manager_id: manager_id.into(),
            salary,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Empty for the root of the organisation.
    pub fn manager_id(&self) -> &str {
        &self.manager_id
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    pub fn is_root(&self) -> bool {
        self.manager_id.is_empty()
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Employee {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Employee {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Parses a salary field. Surrounding whitespace and a leading `+` are
/// accepted; negative or non-numeric text is not.
pub fn parse_salary(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok()
}
