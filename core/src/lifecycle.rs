use serde::{Deserialize, Serialize};

/// The kinds of operations a collection can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Fetch,
    Create,
    Update,
    Delete,
    Search,
}

/// Independent in-flight markers, one per operation kind. A delete never
/// toggles `fetching`; different kinds may be pending at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleFlags {
    pub fetching: bool,
    pub creating: bool,
    pub updating: bool,
    pub deleting: bool,
    pub searching: bool,
}

impl LifecycleFlags {
    pub fn set(&mut self, op: OpKind, busy: bool) {
        match op {
            OpKind::Fetch => self.fetching = busy,
            OpKind::Create => self.creating = busy,
            OpKind::Update => self.updating = busy,
            OpKind::Delete => self.deleting = busy,
            OpKind::Search => self.searching = busy,
        }
    }

    pub fn is(&self, op: OpKind) -> bool {
        match op {
            OpKind::Fetch => self.fetching,
            OpKind::Create => self.creating,
            OpKind::Update => self.updating,
            OpKind::Delete => self.deleting,
            OpKind::Search => self.searching,
        }
    }

    pub fn any(&self) -> bool {
        self.fetching || self.creating || self.updating || self.deleting || self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let mut flags = LifecycleFlags::default();

        flags.set(OpKind::Fetch, true);
        flags.set(OpKind::Delete, true);

        assert!(flags.fetching);
        assert!(flags.deleting);
        assert!(!flags.creating);

        flags.set(OpKind::Delete, false);

        assert!(flags.fetching);
        assert!(!flags.deleting);
        assert!(flags.any());
    }
}
