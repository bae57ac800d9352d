//! Token persistence
//!
//! The bearer token survives restarts when stored in a file; tests and
//! short-lived tools can keep it in memory instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::client::error::ClientError;

const APP_DIR: &str = "todo-auth";
const TOKEN_FILE: &str = "token";

#[derive(Debug)]
enum Backend {
    Memory,
    File(PathBuf),
}

/// Holds the current bearer token
#[derive(Debug)]
pub struct TokenStore {
    backend: Backend,
    token: Option<String>,
}

impl TokenStore {
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory,
            token: None,
        }
    }

    /// File-backed store, loading any token already saved at `path`
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            backend: Backend::File(path),
            token,
        })
    }

    /// `<data_local_dir>/todo-auth/token`
    pub fn default_location() -> Result<Self, ClientError> {
        let dir = dirs::data_local_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no local data directory"))?;
        Self::file(dir.join(APP_DIR).join(TOKEN_FILE))
    }

    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::File(path) => Some(path),
            Backend::Memory => None,
        }
    }

    pub fn set(&mut self, token: impl Into<String>) -> Result<(), ClientError> {
        let token = token.into();
        if let Backend::File(path) = &self.backend {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &token)?;
        }
        self.token = Some(token);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.token = None;
        if let Backend::File(path) = &self.backend {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
