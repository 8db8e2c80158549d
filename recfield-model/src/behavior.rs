use serde::{Deserialize, Serialize};

use crate::Record;

/// A declarative annotation on a field that governs update and comparison
/// policy.
///
/// Only [`Behavior::OutputOnly`] and [`Behavior::Immutable`] drive the
/// field mask and field behavior algorithms; the others are carried through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Behavior {
    Unspecified,
    Optional,
    Required,
    /// Set by clients on requests, never returned in responses.
    InputOnly,
    /// Managed by the server; client-provided values are ignored.
    OutputOnly,
    /// May be set on creation but never changed afterwards.
    Immutable,
}

impl Behavior {
    const ALL: [Behavior; 6] = [
        Behavior::Unspecified,
        Behavior::Optional,
        Behavior::Required,
        Behavior::InputOnly,
        Behavior::OutputOnly,
        Behavior::Immutable,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of [`Behavior`] tags, stored as a bitset.
///
/// Serializes as a list of tag names, e.g. `["OUTPUT_ONLY", "IMMUTABLE"]`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Behavior>", into = "Vec<Behavior>")]
pub struct BehaviorSet(u8);

impl BehaviorSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy of this set with `behavior` added.
    #[must_use]
    pub fn with(mut self, behavior: Behavior) -> Self {
        self.insert(behavior);
        self
    }

    pub fn insert(&mut self, behavior: Behavior) {
        self.0 |= behavior.bit();
    }

    #[must_use]
    pub fn contains(&self, behavior: Behavior) -> bool {
        self.0 & behavior.bit() != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Behavior> + '_ {
        Behavior::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl std::fmt::Debug for BehaviorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Behavior> for BehaviorSet {
    fn from_iter<I: IntoIterator<Item = Behavior>>(iter: I) -> Self {
        let mut set = Self::empty();
        for behavior in iter {
            set.insert(behavior);
        }
        set
    }
}

impl From<Vec<Behavior>> for BehaviorSet {
    fn from(behaviors: Vec<Behavior>) -> Self {
        behaviors.into_iter().collect()
    }
}

impl From<BehaviorSet> for Vec<Behavior> {
    fn from(set: BehaviorSet) -> Self {
        set.iter().collect()
    }
}

/// Clears every field of `record` tagged with `behavior`, at this nesting
/// level only.
pub fn clear_fields(record: &mut Record, behavior: Behavior) {
    let schema = record.schema().clone();
    for field in schema.fields() {
        if field.has_behavior(behavior) {
            record.clear(field.name());
        }
    }
}

/// Copies every field tagged with `behavior` from `src` to `dst`, at this
/// nesting level only. A tagged field that is unset on `src` is cleared on
/// `dst`.
///
/// # Panics
///
/// Panics if `dst` and `src` have different schema types.
pub fn copy_fields(dst: &mut Record, src: &Record, behavior: Behavior) {
    assert!(
        dst.same_type(src),
        "dst ({}) and src ({}) records have different types",
        dst.schema().full_name(),
        src.schema().full_name(),
    );
    for field in src.schema().fields() {
        if !field.has_behavior(behavior) {
            continue;
        }
        match src.get(field.name()) {
            Some(value) => dst.put(field.name(), value.clone()),
            None => dst.clear(field.name()),
        }
    }
}
