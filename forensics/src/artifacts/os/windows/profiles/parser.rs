use super::error::ProfileError;
use crate::{
    hive::{helper::get_string, store::HiveStore},
    utils::regex_options::create_regex,
};
use common::windows::UserProfile;
use log::{debug, error};
use regex::Regex;
use std::path::{Path, PathBuf};

pub(crate) const PROFILE_LIST: &str = "Microsoft\\Windows NT\\CurrentVersion\\ProfileList";

struct PathPatterns {
    system_root: Regex,
    system_drive: Regex,
    drive: Regex,
}

impl PathPatterns {
    fn new() -> Result<PathPatterns, ProfileError> {
        let compile = |input: &str| create_regex(input).map_err(|_| ProfileError::Regex);
        Ok(PathPatterns {
            system_root: compile(r"(?i)%systemroot%")?,
            system_drive: compile(r"(?i)%systemdrive%")?,
            drive: compile(r"^[A-Za-z]:/")?,
        })
    }
}

/// Map every SID in the profile list to its profile directory inside the image
pub(crate) fn grab_profiles(
    software: &dyn HiveStore,
    image_root: &Path,
) -> Result<Vec<UserProfile>, ProfileError> {
    match software.open_key(PROFILE_LIST) {
        Ok(Some(_)) => {}
        Ok(None) => {
            error!("[profiles] SOFTWARE hive has no ProfileList");
            return Err(ProfileError::ProfileList);
        }
        Err(err) => {
            error!("[profiles] Could not open ProfileList: {err:?}");
            return Err(ProfileError::ReadHive);
        }
    }

    let sid_keys = match software.subkeys(PROFILE_LIST) {
        Ok(result) => result,
        Err(err) => {
            error!("[profiles] Could not list ProfileList entries: {err:?}");
            return Err(ProfileError::ReadHive);
        }
    };

    let patterns = PathPatterns::new()?;
    let mut profiles = Vec::new();
    for sid_key in sid_keys {
        let raw_path = match get_string(&sid_key, "ProfileImagePath") {
            Some(result) if !result.trim().is_empty() => result,
            _ => {
                debug!("[profiles] {} has no profile path", sid_key.name);
                continue;
            }
        };
        profiles.push(build_profile(&sid_key.name, &raw_path, image_root, &patterns));
    }

    Ok(profiles)
}

fn build_profile(
    security_id: &str,
    raw_path: &str,
    image_root: &Path,
    patterns: &PathPatterns,
) -> UserProfile {
    let profile_root = normalize_profile_path(raw_path, image_root, patterns);
    let user_name = profile_root
        .strip_prefix(image_root)
        .ok()
        .and_then(|relative| relative.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| security_id.to_string());

    let user_hive = profile_root.join("NTUSER.DAT");
    let mut user_class_hive = profile_root.clone();
    for component in ["AppData", "Local", "Microsoft", "Windows", "UsrClass.dat"] {
        user_class_hive.push(component);
    }

    UserProfile {
        security_id: security_id.to_string(),
        user_name,
        profile_root,
        user_hive,
        user_class_hive,
    }
}

/// Re-root a Windows profile path under the image root
fn normalize_profile_path(raw_path: &str, image_root: &Path, patterns: &PathPatterns) -> PathBuf {
    let path = raw_path.replace('\\', "/");
    let path = patterns.system_root.replace_all(&path, "C:/Windows");
    let path = patterns.system_drive.replace_all(&path, "C:");
    let path = patterns.drive.replace(&path, "");

    let mut profile_root = image_root.to_path_buf();
    for component in path.trim_start_matches('/').split('/') {
        if component.is_empty() || component == "." || component == ".." {
            continue;
        }
        profile_root.push(component);
    }
    profile_root
}
