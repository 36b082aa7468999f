//! The local state record for one managed instance.

use serde::{Deserialize, Serialize};

use crate::attributes::{DatabaseEngine, InstanceSize, Language, Location};

/// Local mirror of one managed instance's declared and observed attributes.
///
/// A record starts unbound, holding only the desired attributes. The
/// reconciler binds the remote identifier exactly once at creation, after
/// which the record is a read-through mirror of the remote resource: every
/// read overwrites the attribute fields with the values observed remotely,
/// and the id is cleared only once remote deletion has been confirmed.
///
/// All attributes are immutable on the remote side; changing any of them
/// means destroying the instance and creating a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceState {
    id: Option<String>,
    pub name: String,
    pub size: InstanceSize,
    pub database_engine: DatabaseEngine,
    pub language: Language,
    pub location: Location,
}

impl InstanceState {
    /// Builds an unbound record from desired attributes.
    pub fn desired(
        name: impl Into<String>,
        size: InstanceSize,
        database_engine: DatabaseEngine,
        language: Language,
        location: Location,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            size,
            database_engine,
            language,
            location,
        }
    }

    /// The identifier assigned by the remote API, if one has been bound.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether this record is attached to a remote instance.
    pub fn is_bound(&self) -> bool {
        self.id.is_some()
    }

    /// Binds the remote identifier to this record.
    ///
    /// An identifier is bound exactly once in a record's lifetime; binding
    /// over an existing id indicates a reconciler bug.
    pub fn bind_id(&mut self, id: impl Into<String>) {
        debug_assert!(self.id.is_none(), "identifier already bound");
        self.id = Some(id.into());
    }

    /// Detaches this record from the remote instance.
    ///
    /// Only called once remote deletion has been confirmed; until then the
    /// id stays bound so the caller can re-poll or retry.
    pub fn clear_id(&mut self) {
        self.id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desired() -> InstanceState {
        InstanceState::desired(
            "site1",
            InstanceSize::Medium,
            DatabaseEngine::Mysql,
            Language::Php,
            Location::FR,
        )
    }

    #[test]
    fn desired_record_starts_unbound() {
        let state = desired();
        assert!(!state.is_bound());
        assert_eq!(state.id(), None);
        assert_eq!(state.name, "site1");
    }

    #[test]
    fn bind_then_clear() {
        let mut state = desired();
        state.bind_id("abc123");
        assert!(state.is_bound());
        assert_eq!(state.id(), Some("abc123"));

        state.clear_id();
        assert!(!state.is_bound());
    }

    #[test]
    fn serializes_with_wire_attribute_strings() {
        let mut state = desired();
        state.bind_id("abc123");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["id"], "abc123");
        assert_eq!(json["size"], "m");
        assert_eq!(json["database_engine"], "mysql");
        assert_eq!(json["language"], "php");
        assert_eq!(json["location"], "FR");
    }
}
