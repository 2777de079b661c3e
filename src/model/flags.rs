//! Packed low-cardinality statement properties.
//!
//! Status, config, mandatory, presence, user ordering and history are stored
//! in one 16-bit word per statement instead of one field each. The bit layout:
//!
//! ```text
//! bits 0-1  status       01 current, 10 deprecated, 11 obsolete
//! bit  2    mandatory
//! bit  4    augmenting   \ history, always written together
//! bit  5    added by uses/
//! bit  6    user ordered
//! bit  7    presence
//! bits 8-9  config       01 undefined, 10 false, 11 true
//! ```
//!
//! A zero field means "never set". Reading a required field (status, config)
//! that was never set is a programming error and panics.

use std::fmt;

use super::argument::Status;

const STATUS_CURRENT: u16 = 0x0001;
const STATUS_DEPRECATED: u16 = 0x0002;
const STATUS_OBSOLETE: u16 = 0x0003;
const MASK_STATUS: u16 = 0x0003;

const MANDATORY: u16 = 0x0004;

const AUGMENTING: u16 = 0x0010;
const ADDED_BY_USES: u16 = 0x0020;
const MASK_HISTORY: u16 = 0x0030;

const USER_ORDERED: u16 = 0x0040;
const PRESENCE: u16 = 0x0080;

const CONFIG_UNDEF: u16 = 0x0100;
const CONFIG_FALSE: u16 = 0x0200;
const CONFIG_TRUE: u16 = 0x0300;
const MASK_CONFIG: u16 = 0x0300;

/// How a statement came to be where it is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct History {
    /// Introduced into its parent by an `augment`.
    pub augmenting: bool,
    /// Introduced by a `uses` expansion. Kept for layout compatibility only.
    pub added_by_uses: bool,
}

impl History {
    /// History of a statement introduced by `augment`.
    pub const AUGMENTING: Self = Self {
        augmenting: true,
        added_by_uses: false,
    };
}

/// An immutable packed flags word.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Flags(u16);

impl Flags {
    /// Start building a flags word.
    pub fn builder() -> FlagsBuilder {
        FlagsBuilder::default()
    }

    /// The raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The status.
    ///
    /// # Panics
    /// Panics if no status was ever set.
    pub fn status(self) -> Status {
        match self.0 & MASK_STATUS {
            STATUS_CURRENT => Status::Current,
            STATUS_DEPRECATED => Status::Deprecated,
            STATUS_OBSOLETE => Status::Obsolete,
            bits => panic!("illegal status flags {bits:#06x}"),
        }
    }

    /// The effective config: `Some(true)`, `Some(false)`, or `None` when undefined.
    ///
    /// # Panics
    /// Panics if no config was ever set.
    pub fn config(self) -> Option<bool> {
        match self.0 & MASK_CONFIG {
            CONFIG_TRUE => Some(true),
            CONFIG_FALSE => Some(false),
            CONFIG_UNDEF => None,
            bits => panic!("unhandled effective config flags {bits:#06x}"),
        }
    }

    pub const fn is_mandatory(self) -> bool {
        self.0 & MANDATORY != 0
    }

    pub const fn is_augmenting(self) -> bool {
        self.0 & AUGMENTING != 0
    }

    #[deprecated(note = "added-by-uses tracking is kept for layout compatibility only")]
    pub const fn is_added_by_uses(self) -> bool {
        self.0 & ADDED_BY_USES != 0
    }

    pub const fn is_user_ordered(self) -> bool {
        self.0 & USER_ORDERED != 0
    }

    pub const fn has_presence(self) -> bool {
        self.0 & PRESENCE != 0
    }

    pub const fn history(self) -> History {
        History {
            augmenting: self.0 & AUGMENTING != 0,
            added_by_uses: self.0 & ADDED_BY_USES != 0,
        }
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({:#06x})", self.0)
    }
}

/// Accumulates properties into a [`Flags`] word.
///
/// Each setter overwrites only its own bit range, so properties may be set in
/// any order and set again.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlagsBuilder {
    bits: u16,
}

impl FlagsBuilder {
    pub fn status(&mut self, status: Status) -> &mut Self {
        let bits = match status {
            Status::Current => STATUS_CURRENT,
            Status::Deprecated => STATUS_DEPRECATED,
            Status::Obsolete => STATUS_OBSOLETE,
        };
        self.bits = self.bits & !MASK_STATUS | bits;
        self
    }

    pub fn config(&mut self, config: Option<bool>) -> &mut Self {
        let bits = match config {
            Some(true) => CONFIG_TRUE,
            Some(false) => CONFIG_FALSE,
            None => CONFIG_UNDEF,
        };
        self.bits = self.bits & !MASK_CONFIG | bits;
        self
    }

    pub fn history(&mut self, history: History) -> &mut Self {
        let mut bits = 0;
        if history.augmenting {
            bits |= AUGMENTING;
        }
        if history.added_by_uses {
            bits |= ADDED_BY_USES;
        }
        self.bits = self.bits & !MASK_HISTORY | bits;
        self
    }

    pub fn mandatory(&mut self, mandatory: bool) -> &mut Self {
        self.set(MANDATORY, mandatory)
    }

    pub fn presence(&mut self, presence: bool) -> &mut Self {
        self.set(PRESENCE, presence)
    }

    pub fn user_ordered(&mut self, user_ordered: bool) -> &mut Self {
        self.set(USER_ORDERED, user_ordered)
    }

    /// Finish building.
    pub fn build(&self) -> Flags {
        Flags(self.bits)
    }

    fn set(&mut self, flag: u16, value: bool) -> &mut Self {
        if value {
            self.bits |= flag;
        } else {
            self.bits &= !flag;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Status::Current)]
    #[case(Status::Deprecated)]
    #[case(Status::Obsolete)]
    fn test_status_round_trip(#[case] status: Status) {
        let flags = Flags::builder().status(status).build();
        assert_eq!(flags.status(), status);
    }

    #[rstest]
    #[case(Some(true))]
    #[case(Some(false))]
    #[case(None)]
    fn test_config_round_trip(#[case] config: Option<bool>) {
        let flags = Flags::builder().status(Status::Current).config(config).build();
        assert_eq!(flags.config(), config);
    }

    #[test]
    fn test_setters_do_not_clobber_each_other() {
        let flags = Flags::builder()
            .config(Some(false))
            .mandatory(true)
            .presence(true)
            .status(Status::Deprecated)
            .user_ordered(true)
            .history(History::AUGMENTING)
            .build();

        assert_eq!(flags.status(), Status::Deprecated);
        assert_eq!(flags.config(), Some(false));
        assert!(flags.is_mandatory());
        assert!(flags.has_presence());
        assert!(flags.is_user_ordered());
        assert!(flags.is_augmenting());
    }

    #[test]
    fn test_setters_overwrite() {
        let flags = Flags::builder()
            .status(Status::Obsolete)
            .status(Status::Current)
            .mandatory(true)
            .mandatory(false)
            .config(Some(true))
            .config(None)
            .build();

        assert_eq!(flags.status(), Status::Current);
        assert!(!flags.is_mandatory());
        assert_eq!(flags.config(), None);
    }

    #[test]
    #[allow(deprecated)]
    fn test_history_packs_both_bits() {
        let history = History {
            augmenting: true,
            added_by_uses: true,
        };
        let flags = Flags::builder().history(history).build();
        assert!(flags.is_augmenting());
        assert!(flags.is_added_by_uses());
        assert_eq!(flags.history(), history);

        let cleared = Flags::builder().history(history).history(History::default()).build();
        assert_eq!(cleared.bits(), 0);
    }

    #[test]
    #[should_panic(expected = "illegal status")]
    fn test_unset_status_panics() {
        Flags::default().status();
    }

    #[test]
    #[should_panic(expected = "unhandled effective config")]
    fn test_unset_config_panics() {
        Flags::builder().status(Status::Current).build().config();
    }

    #[test]
    fn test_flags_size() {
        assert_eq!(std::mem::size_of::<Flags>(), 2);
    }
}
