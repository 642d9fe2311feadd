//! Identifiers naming a concrete backend binding.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Tag naming a backend binding, e.g. `supabase`.
///
/// Identifiers are lowercase ASCII letters, digits, `-` and `_`. The set is
/// open: registries may hold any identifier, but only [`ImplementationId::KNOWN`]
/// values are accepted from the environment.
///
/// # Examples
/// ```
/// use data_provider::provider::ImplementationId;
///
/// let id: ImplementationId = "supabase".parse().expect("valid identifier");
/// assert_eq!(id, ImplementationId::SUPABASE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImplementationId(Cow<'static, str>);

/// Validation errors for [`ImplementationId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImplementationIdError {
    /// The identifier is empty.
    #[error("implementation identifier must not be empty")]
    Empty,
    /// The identifier contains a character outside `[a-z0-9_-]`.
    #[error("implementation identifier '{value}' may only contain lowercase letters, digits, '-' and '_'")]
    InvalidCharacter {
        /// Rejected input.
        value: String,
    },
}

impl ImplementationId {
    /// Supabase (Postgres, auth, storage over HTTP).
    pub const SUPABASE: Self = Self(Cow::Borrowed("supabase"));
    /// Firebase.
    pub const FIREBASE: Self = Self(Cow::Borrowed("firebase"));
    /// Prisma-managed SQL.
    pub const PRISMA: Self = Self(Cow::Borrowed("prisma"));

    /// Identifiers the application knows about.
    pub const KNOWN: [Self; 3] = [Self::SUPABASE, Self::FIREBASE, Self::PRISMA];

    /// Validate and wrap an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, ImplementationIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ImplementationIdError::Empty);
        }
        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(ImplementationIdError::InvalidCharacter { value });
        }
        Ok(Self(Cow::Owned(value)))
    }

    /// The member of [`ImplementationId::KNOWN`] spelled `value`, if any.
    pub fn known(value: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|id| id.as_str() == value)
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImplementationId {
    type Err = ImplementationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parsed_identifiers_equal_constants() {
        assert_eq!(ImplementationId::new("prisma"), Ok(ImplementationId::PRISMA));
    }

    #[rstest]
    #[case::empty("", ImplementationIdError::Empty)]
    #[case::uppercase(
        "Supabase",
        ImplementationIdError::InvalidCharacter { value: "Supabase".to_owned() }
    )]
    #[case::whitespace(
        " supabase",
        ImplementationIdError::InvalidCharacter { value: " supabase".to_owned() }
    )]
    fn rejects_malformed_identifiers(#[case] raw: &str, #[case] expected: ImplementationIdError) {
        assert_eq!(ImplementationId::new(raw), Err(expected));
    }

    #[rstest]
    #[case("supabase", Some(ImplementationId::SUPABASE))]
    #[case("firebase", Some(ImplementationId::FIREBASE))]
    #[case("unregistered_impl", None)]
    fn known_only_matches_the_closed_set(
        #[case] raw: &str,
        #[case] expected: Option<ImplementationId>,
    ) {
        assert_eq!(ImplementationId::known(raw), expected);
    }
}
