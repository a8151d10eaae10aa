use super::{
    error::HiveError,
    store::{HiveKey, HiveStore, ValueData},
};
use log::error;

/// The active numbered `ControlSetNNN` of a SYSTEM hive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSet {
    number: u32,
}

impl ControlSet {
    /// Read `Select\Current`. Anything but a number from 1 to 999 is an error
    pub fn resolve(store: &dyn HiveStore) -> Result<ControlSet, HiveError> {
        let select = match store.open_key("Select")? {
            Some(result) => result,
            None => {
                error!("[controlset] SYSTEM hive has no Select key");
                return Err(HiveError::ControlSet);
            }
        };

        let current = select.value("Current").and_then(|value| match &value.data {
            ValueData::Dword(number) => Some(*number),
            ValueData::Qword(number) => u32::try_from(*number).ok(),
            ValueData::String(text) => text.trim().parse().ok(),
            _ => None,
        });

        let max_sets = 999;
        match current {
            Some(number) if (1..=max_sets).contains(&number) => Ok(ControlSet { number }),
            _ => {
                error!("[controlset] Select\\Current is missing or not a valid control set number");
                Err(HiveError::ControlSet)
            }
        }
    }

    /// Zero padded three digit segment, ex: `001`
    pub fn segment(&self) -> String {
        format!("{:03}", self.number)
    }

    /// Prefix a path relative to the control set root
    pub fn path(&self, relative: &str) -> String {
        let relative = relative.trim_matches('\\');
        if relative.is_empty() {
            return format!("ControlSet{}", self.segment());
        }
        format!("ControlSet{}\\{relative}", self.segment())
    }
}

/// A SYSTEM hive with its control set resolved once at open
pub struct SystemHive {
    store: Box<dyn HiveStore>,
    control_set: ControlSet,
}

impl SystemHive {
    pub fn open(store: Box<dyn HiveStore>) -> Result<SystemHive, HiveError> {
        let control_set = ControlSet::resolve(store.as_ref())?;
        Ok(SystemHive { store, control_set })
    }

    pub fn store(&self) -> &dyn HiveStore {
        self.store.as_ref()
    }

    /// Full hive path for a path below the current control set
    pub fn path(&self, relative: &str) -> String {
        self.control_set.path(relative)
    }

    pub fn open_key(&self, relative: &str) -> Result<Option<HiveKey>, HiveError> {
        self.store.open_key(&self.control_set.path(relative))
    }

    pub fn subkeys(&self, relative: &str) -> Result<Vec<HiveKey>, HiveError> {
        self.store.subkeys(&self.control_set.path(relative))
    }
}
