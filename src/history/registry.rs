use std::collections::HashSet;

/// Usernames considered already claimed.
/// A name is available iff it is not a member.
#[derive(Debug, Clone, Default)]
pub struct TakenRegistry {
    names: HashSet<String>,
}

impl TakenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.names.contains(username)
    }

    pub fn is_available(&self, username: &str) -> bool {
        !self.contains(username)
    }

    /// Returns false if the name was already claimed
    pub fn insert(&mut self, username: impl Into<String>) -> bool {
        self.names.insert(username.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TakenRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
