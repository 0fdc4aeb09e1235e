//! Identifier types shared by the SEARCH and FETCH exchanges.

use std::num::NonZeroU32;

/// Unique identifier for a message.
///
/// UIDs are persistent identifiers assigned by the mail store; they do not
/// change when other messages are expunged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid(pub NonZeroU32);

impl Uid {
    /// Creates a new UID.
    ///
    /// Returns `None` if the value is 0.
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered sequence of UIDs as reported by a SEARCH response.
///
/// Server reporting order is preserved and duplicates are kept. The
/// `Display` form is the comma-joined list used to build the follow-up
/// FETCH command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UidSet(Vec<Uid>);

impl UidSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a UID, keeping insertion order.
    pub fn push(&mut self, uid: Uid) {
        self.0.push(uid);
    }

    /// Returns true when the search reported no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of UIDs in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the UIDs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = Uid> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Uid> for UidSet {
    fn from_iter<I: IntoIterator<Item = Uid>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for UidSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, uid) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{uid}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn uid_new_valid() {
        let uid = Uid::new(100);
        assert!(uid.is_some());
        assert_eq!(uid.unwrap().get(), 100);
    }

    #[test]
    fn uid_new_zero_returns_none() {
        assert!(Uid::new(0).is_none());
    }

    #[test]
    fn uid_display() {
        let uid = Uid::new(12345).unwrap();
        assert_eq!(format!("{uid}"), "12345");
    }

    #[test]
    fn uid_set_display_comma_joined() {
        let set: UidSet = [3, 7, 9].iter().map(|&n| Uid::new(n).unwrap()).collect();
        assert_eq!(set.to_string(), "3,7,9");
    }

    #[test]
    fn uid_set_empty_displays_empty() {
        assert_eq!(UidSet::new().to_string(), "");
        assert!(UidSet::new().is_empty());
    }

    #[test]
    fn uid_set_preserves_order_and_duplicates() {
        let set: UidSet = [9, 3, 3].iter().map(|&n| Uid::new(n).unwrap()).collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "9,3,3");
    }
}
