use std::{error::Error, fmt};

/// Upstream data source a lookup talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Pdb,
    Chembl,
    Pubchem,
    Drugbank,
    Uniprot,
    Hgnc,
}

impl Provider {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pdb => "PDB",
            Self::Chembl => "ChEMBL",
            Self::Pubchem => "PubChem",
            Self::Drugbank => "DrugBank",
            Self::Uniprot => "UniProt",
            Self::Hgnc => "HGNC",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Faults raised while talking to an upstream provider.
///
/// A missing record is not a fault; see [`crate::Lookup::NotFound`].
#[derive(Debug)]
pub enum ProviderError {
    Client(reqwest::Error),
    InvalidUrl { url: String, message: String },
    Transport { provider: Provider, error: reqwest::Error },
    Decode { provider: Provider, message: String },
    Encode(serde_json::Error),
}

impl ProviderError {
    pub(crate) fn transport(provider: Provider) -> impl FnOnce(reqwest::Error) -> Self {
        move |error| Self::Transport { provider, error }
    }

    pub(crate) fn decode(provider: Provider, message: impl fmt::Display) -> Self {
        Self::Decode {
            provider,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::InvalidUrl { url, message } => write!(f, "invalid endpoint {url}: {message}"),
            Self::Transport { provider, error } => {
                write!(f, "{provider} request failed: {error}")
            }
            Self::Decode { provider, message } => {
                write!(f, "{provider} returned an unreadable response: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode result: {err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) | Self::Transport { error: err, .. } => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidUrl { .. } | Self::Decode { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}
