//! Validated control-plane identifiers.
//!
//! Names coming out of the catalog are opaque. Before one is placed into a
//! control-plane statement it must become an [`Identifier`], which is always
//! rendered quoted, never spliced in raw.

use std::fmt;

use crate::error::IdentifierError;

/// Longest identifier Redshift accepts, in bytes.
pub const MAX_IDENTIFIER_BYTES: usize = 127;

/// A schema, table, or share name that is safe to quote into a statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: &str) -> Result<Self, IdentifierError> {
        if name.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if name.contains('\0') {
            return Err(IdentifierError::NulCharacter {
                name: name.to_owned(),
            });
        }
        if name.len() > MAX_IDENTIFIER_BYTES {
            return Err(IdentifierError::TooLong {
                name: name.to_owned(),
                len: name.len(),
                max: MAX_IDENTIFIER_BYTES,
            });
        }
        Ok(Self(name.to_owned()))
    }

    /// The raw, unquoted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form with embedded quotes doubled.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0.replace('"', "\"\""))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quoted())
    }
}
