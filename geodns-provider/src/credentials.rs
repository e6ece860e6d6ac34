//! Credential shapes and validation of caller-supplied credentials against them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Credentials supplied by a caller.
///
/// `Debug` never prints the values.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum Credentials {
    /// The provider needs no credentials.
    Anonymous,
    /// Positional values, matched against a shape by arity.
    List(Vec<String>),
    /// Named values, matched against a shape by parameter names.
    Map(BTreeMap<String, String>),
}

impl Credentials {
    /// Positional credentials from anything string-like.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        match self {
            Self::Anonymous => 0,
            Self::List(values) => values.len(),
            Self::Map(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::List(values) => write!(f, "List(<{} values>)", values.len()),
            Self::Map(values) => f
                .debug_tuple("Map")
                .field(&values.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// A named, ordered list of parameters a provider accepts for authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialShape {
    /// Shape name (`"password"`, `"session"`, ...).
    pub name: String,
    /// Parameter names in positional order.
    pub parameters: Vec<String>,
}

impl CredentialShape {
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    fn accepts(&self, supplied: &Credentials) -> bool {
        match supplied {
            Credentials::Anonymous => self.parameters.is_empty(),
            Credentials::List(values) => values.len() == self.parameters.len(),
            Credentials::Map(values) => {
                values.len() == self.parameters.len()
                    && self
                        .parameters
                        .iter()
                        .collect::<BTreeSet<_>>()
                        .into_iter()
                        .eq(values.keys())
            }
        }
    }
}

impl fmt::Display for CredentialShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.parameters.join(", "))
    }
}

/// Every credential shape a provider accepts, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialShapeCatalog {
    /// Provider name, used in diagnostics.
    pub provider: String,
    pub shapes: Vec<CredentialShape>,
}

impl CredentialShapeCatalog {
    pub fn new(provider: impl Into<String>, shapes: Vec<CredentialShape>) -> Self {
        Self {
            provider: provider.into(),
            shapes,
        }
    }

    /// A provider that needs no credentials.
    pub fn anonymous(provider: impl Into<String>) -> Self {
        Self::new(provider, Vec::new())
    }

    /// Append a shape.
    #[must_use]
    pub fn with_shape<I, S>(mut self, name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shapes.push(CredentialShape::new(name, parameters));
        self
    }

    /// What the provider requires, phrased for error messages.
    ///
    /// One shape: `password requires username, password`.
    /// Several: `multipart requires one of the following forms: when type is a: x, y; b: x, y, z`.
    fn requirement(&self) -> String {
        match self.shapes.as_slice() {
            [] => format!("{} does not accept credentials", self.provider),
            [only] => format!("{} requires {}", only.name, only.parameters.join(", ")),
            shapes => format!(
                "{} requires one of the following forms: when type is {}",
                self.provider,
                shapes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            ),
        }
    }
}

/// Why supplied credentials were rejected. The messages are stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialValidationError {
    /// No catalog was given to validate against.
    #[error("provider cannot be null")]
    ProviderMissing,

    /// The provider requires credentials and none were supplied.
    #[error("no credentials supplied. {requirement}")]
    NotSupplied { requirement: String },

    /// Credentials were supplied but match no accepted shape.
    #[error("incorrect credentials supplied. {requirement}")]
    Incorrect { requirement: String },
}

/// Check `supplied` against the shapes `provider` accepts.
///
/// Returns the supplied credentials unchanged on a match, or
/// [`Credentials::Anonymous`] when the provider declares no shapes and nothing
/// was supplied. `None`, [`Credentials::Anonymous`] and an empty list or map all
/// count as "nothing supplied".
///
/// # Errors
///
/// See [`CredentialValidationError`]; a missing `provider` is reported before
/// anything about the credentials.
pub fn check_valid_for_provider(
    supplied: Option<&Credentials>,
    provider: Option<&CredentialShapeCatalog>,
) -> Result<Credentials, CredentialValidationError> {
    let catalog = provider.ok_or(CredentialValidationError::ProviderMissing)?;
    let supplied = supplied.filter(|c| !c.is_empty());

    match (supplied, catalog.shapes.is_empty()) {
        (None, true) => Ok(Credentials::Anonymous),
        (None, false) => Err(CredentialValidationError::NotSupplied {
            requirement: catalog.requirement(),
        }),
        (Some(credentials), _) => {
            if catalog.shapes.iter().any(|shape| shape.accepts(credentials)) {
                Ok(credentials.clone())
            } else {
                Err(CredentialValidationError::Incorrect {
                    requirement: catalog.requirement(),
                })
            }
        }
    }
}
