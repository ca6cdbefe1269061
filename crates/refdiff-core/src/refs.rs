use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Two refs to compare, as written by users in plan options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefPair {
    #[serde(alias = "NewRef")]
    pub new_ref: String,
    #[serde(alias = "OldRef")]
    pub old_ref: String,
}

impl RefPair {
    #[must_use]
    pub fn new(new_ref: impl Into<String>, old_ref: impl Into<String>) -> Self {
        Self {
            new_ref: new_ref.into(),
            old_ref: old_ref.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.new_ref.trim().is_empty() {
            return Err(Error::invalid(format!(
                "ref pair has an empty newRef (oldRef '{}')",
                self.old_ref
            )));
        }
        if self.old_ref.trim().is_empty() {
            return Err(Error::invalid(format!(
                "ref pair has an empty oldRef (newRef '{}')",
                self.new_ref
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.new_ref == self.old_ref
    }

    pub(crate) fn matches(&self, new_ref: &str, old_ref: &str) -> bool {
        self.new_ref == new_ref && self.old_ref == old_ref
    }
}

impl fmt::Display for RefPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.new_ref, self.old_ref)
    }
}

macro_rules! fixed_ref_tuple {
    ($(#[$meta:meta])* $name:ident, $arity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name([String; $arity]);

        impl $name {
            pub const ARITY: usize = $arity;

            #[must_use]
            pub const fn new(slots: [String; $arity]) -> Self {
                Self(slots)
            }

            #[must_use]
            pub fn as_slice(&self) -> &[String] {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> [String; $arity] {
                self.0
            }
        }

        impl From<[String; $arity]> for $name {
            fn from(slots: [String; $arity]) -> Self {
                Self(slots)
            }
        }

        impl From<[&str; $arity]> for $name {
            fn from(slots: [&str; $arity]) -> Self {
                Self(slots.map(str::to_string))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0.join(" "))
            }
        }
    };
}

fixed_ref_tuple!(
    /// Resolved comparison produced by the pipeline engine.
    ///
    /// The meaning of each slot belongs to the engine; this type only
    /// guarantees the four-string shape on the wire.
    RefCommitPair,
    4
);

fixed_ref_tuple!(
    /// Two refs as a positional array. Slot meaning is left to the engine.
    RefPairList,
    2
);
