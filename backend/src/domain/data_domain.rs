//! Functional areas that each own one repository contract.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named functional area of the application.
///
/// The set is closed and known at compile time. Each domain has exactly one
/// repository port in [`crate::domain::ports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// Authentication and session handling.
    User,
    /// User profile records.
    Profile,
    /// Payments made by users.
    Payment,
    /// Real-estate listings.
    Property,
    /// System-wide settings.
    System,
    /// Localized UI strings.
    Translation,
    /// Postal addresses and the location hierarchy.
    Address,
    /// File storage buckets.
    Storage,
    /// Plans and active subscriptions.
    Subscription,
    /// Invoices.
    Billing,
    /// Feature toggles.
    FeatureFlag,
}

impl Domain {
    /// Every domain, in resolution order. Matches declaration order.
    pub const ALL: [Self; 11] = [
        Self::User,
        Self::Profile,
        Self::Payment,
        Self::Property,
        Self::System,
        Self::Translation,
        Self::Address,
        Self::Storage,
        Self::Subscription,
        Self::Billing,
        Self::FeatureFlag,
    ];

    /// Position of the domain in [`Domain::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Configuration name of the domain.
    ///
    /// # Examples
    /// ```
    /// use data_provider::domain::Domain;
    ///
    /// assert_eq!(Domain::FeatureFlag.as_str(), "featureFlag");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Profile => "profile",
            Self::Payment => "payment",
            Self::Property => "property",
            Self::System => "system",
            Self::Translation => "translation",
            Self::Address => "address",
            Self::Storage => "storage",
            Self::Subscription => "subscription",
            Self::Billing => "billing",
            Self::FeatureFlag => "featureFlag",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown domain '{name}'")]
pub struct DomainParseError {
    /// The unrecognized name.
    pub name: String,
}

impl FromStr for Domain {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| DomainParseError { name: s.to_owned() })
    }
}
