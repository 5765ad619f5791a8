use std::fmt;

/// Prefix GitHub uses for fine-grained personal access tokens
const FINE_GRAINED_PREFIX: &str = "github_pat_";

/// API version pinned alongside bearer authentication
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub credential, classified by token shape
///
/// Fine-grained tokens authenticate with the `Bearer` scheme; classic
/// tokens use the legacy `token` scheme.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    FineGrained(String),
    Classic(String),
}

impl Credential {
    /// Classifies a raw token string; blank input yields no credential
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if token.starts_with(FINE_GRAINED_PREFIX) {
            Some(Credential::FineGrained(token.to_string()))
        } else {
            Some(Credential::Classic(token.to_string()))
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        match self {
            Credential::FineGrained(token) => format!("Bearer {}", token),
            Credential::Classic(token) => format!("token {}", token),
        }
    }

    /// `X-GitHub-Api-Version` value to send with this credential, if any
    pub fn api_version(&self) -> Option<&'static str> {
        match self {
            Credential::FineGrained(_) => Some(GITHUB_API_VERSION),
            Credential::Classic(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credential::FineGrained(_) => "fine-grained token (Bearer)",
            Credential::Classic(_) => "classic token",
        }
    }
}

// Never print the secret itself.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.kind())
    }
}
