use super::{error::ActivityError, mru::open};
use crate::hive::{
    controlset::SystemHive,
    helper::normalize_multi_value,
    store::{HiveKey, HiveStore},
};
use common::windows::EnvironmentVariable;
use log::error;

const USER_ENVIRONMENT: &str = "Environment";
const SYSTEM_ENVIRONMENT: &str = "Control\\Session Manager\\Environment";

/// Environment variables set for one user
pub(crate) fn grab_user_environment(
    ntuser: &dyn HiveStore,
) -> Result<Vec<EnvironmentVariable>, ActivityError> {
    Ok(open(ntuser, USER_ENVIRONMENT)?
        .map(|key| get_variables(&key))
        .unwrap_or_default())
}

/// Environment variables set for the whole system in the active control set
pub(crate) fn grab_system_environment(
    system: &SystemHive,
) -> Result<Vec<EnvironmentVariable>, ActivityError> {
    match system.open_key(SYSTEM_ENVIRONMENT) {
        Ok(result) => Ok(result.map(|key| get_variables(&key)).unwrap_or_default()),
        Err(err) => {
            error!("[activity] Could not open system environment: {err:?}");
            Err(ActivityError::ReadHive)
        }
    }
}

fn get_variables(key: &HiveKey) -> Vec<EnvironmentVariable> {
    key.values
        .iter()
        .filter(|value| !value.name.is_empty())
        .map(|value| EnvironmentVariable {
            name: value.name.clone(),
            value: normalize_multi_value(&value.data).join(";"),
        })
        .collect()
}
