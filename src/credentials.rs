//! Application credentials (client id + secret) and their optional on-disk source.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Outcome of looking for a credentials file.
#[derive(Debug)]
pub enum CredentialFile {
    Missing,
    Loaded(Credential),
    /// File exists but is not `{client_id, client_secret}`; carries the reason.
    Malformed(String),
}

impl Credential {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into().trim().to_string(), client_secret: client_secret.into().trim().to_string() }
    }

    /// Read a credentials file. A missing file is not an error.
    pub fn load(path: &Path) -> CredentialFile {
        let f = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CredentialFile::Missing,
            Err(e) => return CredentialFile::Malformed(format!("{}: {}", path.display(), e)),
        };
        match Self::from_reader(BufReader::new(f)) {
            Ok(c) => {
                tracing::debug!(path=%path.display(), "loaded credentials file");
                CredentialFile::Loaded(c)
            }
            Err(e) => CredentialFile::Malformed(format!("{e:#}")),
        }
    }

    pub fn from_reader<R: std::io::Read>(rdr: R) -> Result<Self> {
        let c: Credential = serde_json::from_reader(rdr).context("credentials must be {\"client_id\", \"client_secret\"}")?;
        if c.client_id.trim().is_empty() || c.client_secret.trim().is_empty() {
            return Err(anyhow!("client_id and client_secret must not be empty"));
        }
        Ok(Self::new(c.client_id, c.client_secret))
    }
}
