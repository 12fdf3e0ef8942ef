// ── Session handle ──
//
// `ProtectClient` is the opaque session value threaded into constructed
// entities. The dispatcher never looks inside it; entities keep a clone
// for later lazy operations. Core never reads config files -- the CLI or
// `ufp-config` builds a `SessionConfig` and hands it in.

use std::fmt;
use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

/// Connection details for a single Protect NVR.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// NVR base URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Local Protect username.
    pub username: String,
    pub password: SecretString,
    /// Verify the NVR's TLS certificate. Most consoles are self-signed.
    pub verify_ssl: bool,
}

/// Cheaply clonable handle to an API session.
///
/// Clones share the same underlying session; [`ProtectClient::same_session`]
/// tells whether two handles point at it.
#[derive(Clone)]
pub struct ProtectClient {
    inner: Arc<SessionConfig>,
}

impl ProtectClient {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(config),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.url
    }

    pub fn username(&self) -> &str {
        &self.inner.username
    }

    pub fn password(&self) -> &SecretString {
        &self.inner.password
    }

    pub fn verify_ssl(&self) -> bool {
        self.inner.verify_ssl
    }

    pub fn same_session(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ProtectClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectClient")
            .field("url", &self.inner.url.as_str())
            .field("username", &self.inner.username)
            .finish_non_exhaustive()
    }
}
