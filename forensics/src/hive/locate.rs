use super::{error::HiveError, memory::MemoryHive, store::HiveStore};
use glob::{MatchOptions, Pattern, glob_with};
use log::{info, warn};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiveKind {
    System,
    Software,
    Sam,
    Security,
}

impl HiveKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            HiveKind::System => "SYSTEM",
            HiveKind::Software => "SOFTWARE",
            HiveKind::Sam => "SAM",
            HiveKind::Security => "SECURITY",
        }
    }
}

/// Hive files of a mounted Windows image
#[derive(Debug, Clone)]
pub struct ImageHives {
    root: PathBuf,
}

impl ImageHives {
    pub fn new(root: &Path) -> ImageHives {
        ImageHives {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expected location of a system hive inside the image
    pub fn hive_path(&self, kind: HiveKind) -> PathBuf {
        let mut path = self.root.clone();
        for component in ["Windows", "System32", "config", kind.file_name()] {
            path.push(component);
        }
        path
    }

    /// Open a system hive. `Ok(None)` when the image does not have it
    pub fn open(&self, kind: HiveKind) -> Result<Option<Box<dyn HiveStore>>, HiveError> {
        open_hive_file(&self.hive_path(kind))
    }
}

/// Open a hive file. A `<file>.json` registry export next to it is preferred over the raw file
pub fn open_hive_file(path: &Path) -> Result<Option<Box<dyn HiveStore>>, HiveError> {
    let mut export_name: OsString = path.as_os_str().to_os_string();
    export_name.push(".json");

    if let Some(export) = find_file(Path::new(&export_name)) {
        info!("[hive] Loading registry export {export:?}");
        let hive = MemoryHive::read_export(&export)?;
        return Ok(Some(Box::new(hive)));
    }

    let raw = match find_file(path) {
        Some(result) => result,
        None => return Ok(None),
    };
    open_raw(&raw)
}

#[cfg(feature = "raw-hives")]
fn open_raw(path: &Path) -> Result<Option<Box<dyn HiveStore>>, HiveError> {
    let hive = super::raw::RawHive::open(path)?;
    Ok(Some(Box::new(hive)))
}

#[cfg(not(feature = "raw-hives"))]
fn open_raw(path: &Path) -> Result<Option<Box<dyn HiveStore>>, HiveError> {
    warn!("[hive] Found raw hive {path:?} but raw hive support is not enabled. Provide a JSON export");
    Ok(None)
}

/// Find a file, ignoring case. Images mounted on Linux keep the Windows casing
pub(crate) fn find_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let pattern = case_pattern(&path.to_string_lossy());
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = match glob_with(&pattern, options) {
        Ok(result) => result,
        Err(err) => {
            warn!("[hive] Bad glob for {path:?}: {err:?}");
            return None;
        }
    };

    entries.flatten().find(|entry| entry.is_file())
}

/// Turn every letter into a `[xX]` class. glob only folds case for components with wildcards
fn case_pattern(path: &str) -> String {
    let mut pattern = String::new();
    for character in path.chars() {
        if character.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(character.to_ascii_lowercase());
            pattern.push(character.to_ascii_uppercase());
            pattern.push(']');
        } else if character == '/' || character == std::path::MAIN_SEPARATOR {
            pattern.push(character);
        } else {
            pattern.push_str(&Pattern::escape(&character.to_string()));
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::{HiveKind, ImageHives, case_pattern, find_file, open_hive_file};
    use std::path::PathBuf;

    fn image_root() -> PathBuf {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/image");
        test_location
    }

    #[test]
    fn test_hive_path() {
        let hives = ImageHives::new(&PathBuf::from("/mnt/img"));
        assert_eq!(
            hives.hive_path(HiveKind::Sam),
            PathBuf::from("/mnt/img/Windows/System32/config/SAM")
        );
    }

    #[test]
    fn test_open_export() {
        let hives = ImageHives::new(&image_root());
        let system = hives.open(HiveKind::System).unwrap().unwrap();
        assert!(system.open_key("Select").unwrap().is_some());

        assert!(hives.open(HiveKind::Security).unwrap().is_none());
    }

    #[test]
    fn test_find_file_case() {
        let mut lower = image_root();
        lower.push("windows/system32/config/system.json");
        let found = find_file(&lower).unwrap();
        assert!(found.ends_with("Windows/System32/config/SYSTEM.json"));

        let mut user_hive = image_root();
        user_hive.push("USERS/ALICE/ntuser.dat.json");
        assert!(find_file(&user_hive).unwrap().ends_with("Users/alice/NTUSER.DAT.json"));

        let mut missing = image_root();
        missing.push("Windows/System32/config/DEFAULT");
        assert!(find_file(&missing).is_none());
        assert!(open_hive_file(&missing).unwrap().is_none());
    }

    #[test]
    fn test_case_pattern() {
        assert_eq!(case_pattern("/mnt/Ab"), "/[mM][nN][tT]/[aA][bB]");
        assert_eq!(case_pattern("x[1]*.dat"), "[xX][[]1[]][*].[dD][aA][tT]");
    }
}
