//! Failures raised while resolving a provider configuration.
//!
//! These are start-up errors: they surface before any repository method runs
//! and carry enough context for an operator to fix the configuration.

use thiserror::Error;

use super::ImplementationId;

/// Resolution failure for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The registry holds no table for the domain at all.
    #[error("data provider domain '{domain}' not found")]
    DomainNotFound {
        /// Requested domain name.
        domain: String,
    },
    /// The domain exists but the requested slot is missing or not implemented.
    #[error(
        "implementation '{implementation}' is not available for domain '{domain}' (available: {})",
        describe_available(.available)
    )]
    ImplementationUnavailable {
        /// Requested identifier.
        implementation: String,
        /// Domain being resolved.
        domain: String,
        /// Identifiers that are implemented for the domain.
        available: Vec<ImplementationId>,
    },
    /// The environment layer could not be read.
    #[error("data provider settings could not be loaded: {message}")]
    Environment {
        /// Loader message.
        message: String,
    },
}

fn describe_available(available: &[ImplementationId]) -> String {
    if available.is_empty() {
        return "none".to_owned();
    }
    available
        .iter()
        .map(ImplementationId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_names_the_domain() {
        let err = ResolutionError::DomainNotFound {
            domain: "nonexistent_domain".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "data provider domain 'nonexistent_domain' not found"
        );
    }

    #[test]
    fn unavailable_lists_what_is_available() {
        let err = ResolutionError::ImplementationUnavailable {
            implementation: "firebase".to_owned(),
            domain: "user".to_owned(),
            available: vec![ImplementationId::SUPABASE, ImplementationId::PRISMA],
        };
        assert_eq!(
            err.to_string(),
            "implementation 'firebase' is not available for domain 'user' (available: supabase, prisma)"
        );
    }

    #[test]
    fn environment_failure_carries_loader_message() {
        let err = ResolutionError::Environment {
            message: "invalid value for DATA_PROVIDER".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "data provider settings could not be loaded: invalid value for DATA_PROVIDER"
        );
    }

    #[test]
    fn unavailable_with_nothing_registered_says_none() {
        let err = ResolutionError::ImplementationUnavailable {
            implementation: "supabase".to_owned(),
            domain: "billing".to_owned(),
            available: Vec::new(),
        };
        assert!(err.to_string().ends_with("(available: none)"));
    }
}
