use super::error::AccountError;
use crate::hive::store::HiveStore;
use log::{debug, error};
use std::{
    collections::HashMap,
    fs::read_to_string,
    path::{Path, PathBuf},
};

/// Supplies password hashes keyed by RID. Decrypting the SAM is left to the implementation
pub trait CredentialSource {
    fn hashes(
        &self,
        sam: &dyn HiveStore,
        system: Option<&dyn HiveStore>,
    ) -> Result<HashMap<u32, String>, AccountError>;
}

/// No hashes available
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn hashes(
        &self,
        _sam: &dyn HiveStore,
        _system: Option<&dyn HiveStore>,
    ) -> Result<HashMap<u32, String>, AccountError> {
        Ok(HashMap::new())
    }
}

/// Hashes already extracted to a pwdump style file (`user:rid:lm:nt:::`)
pub struct PwdumpFile {
    path: PathBuf,
}

impl PwdumpFile {
    pub fn new(path: &Path) -> PwdumpFile {
        PwdumpFile {
            path: path.to_path_buf(),
        }
    }
}

impl CredentialSource for PwdumpFile {
    fn hashes(
        &self,
        _sam: &dyn HiveStore,
        _system: Option<&dyn HiveStore>,
    ) -> Result<HashMap<u32, String>, AccountError> {
        let text = match read_to_string(&self.path) {
            Ok(result) => result,
            Err(err) => {
                error!("[accounts] Could not read hash file {:?}: {err:?}", self.path);
                return Err(AccountError::HashFile);
            }
        };
        Ok(parse_pwdump(&text))
    }
}

/// Parse `user:rid:lm:nt:::` lines. The NT hash is kept. Malformed lines are skipped
pub(crate) fn parse_pwdump(text: &str) -> HashMap<u32, String> {
    let mut hashes = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        let min_parts = 4;
        if parts.len() < min_parts {
            debug!("[accounts] Skipping hash line without enough fields");
            continue;
        }

        let rid = match parts[1].parse::<u32>() {
            Ok(result) => result,
            Err(_) => {
                debug!("[accounts] Skipping hash line with bad RID {}", parts[1]);
                continue;
            }
        };
        hashes.insert(rid, parts[3].to_string());
    }
    hashes
}
