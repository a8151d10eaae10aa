use super::{
    error::AccountError,
    layout::{V_COMMENT, V_FULL_NAME, V_USER_NAME},
    users::{ACB_DISABLED, ACB_PASSWORD_NO_EXPIRE, FRecord, get_flags, read_v_string},
};
use crate::{
    hive::{
        helper::{get_binary, key_time},
        store::{HiveKey, HiveStore},
    },
    utils::diagnostics::Diagnostics,
};
use common::windows::AccountRecord;
use log::error;
use std::collections::HashMap;

pub(crate) const USERS_KEY: &str = "SAM\\Domains\\Account\\Users";

/// Parse every local account in the SAM hive, sorted by RID
pub(crate) fn grab_accounts(
    sam: &dyn HiveStore,
    hashes: &HashMap<u32, String>,
    diag: &mut Diagnostics,
) -> Result<Vec<AccountRecord>, AccountError> {
    let users_result = sam.open_key(USERS_KEY);
    match users_result {
        Ok(Some(_)) => {}
        Ok(None) => {
            error!("[accounts] SAM hive has no {USERS_KEY} key");
            return Err(AccountError::UsersKey);
        }
        Err(err) => {
            error!("[accounts] Could not open {USERS_KEY}: {err:?}");
            return Err(AccountError::ReadHive);
        }
    }

    let subkeys = match sam.subkeys(USERS_KEY) {
        Ok(result) => result,
        Err(err) => {
            error!("[accounts] Could not list user keys: {err:?}");
            return Err(AccountError::ReadHive);
        }
    };

    let mut accounts = Vec::new();
    for key in subkeys {
        if key.name.eq_ignore_ascii_case("Names") {
            continue;
        }

        match parse_user(&key, hashes) {
            Ok(result) => accounts.push(result),
            Err(err) => diag.warning("accounts", format!("Skipping {}: {err}", key.path)),
        }
    }

    accounts.sort_by_key(|account| account.relative_id);
    Ok(accounts)
}

/// Combine the `F` and `V` values of one user key
fn parse_user(key: &HiveKey, hashes: &HashMap<u32, String>) -> Result<AccountRecord, AccountError> {
    let relative_id = match u32::from_str_radix(&key.name, 16) {
        Ok(result) => result,
        Err(_) => return Err(AccountError::RelativeId),
    };

    let f_data = match get_binary(key, "F") {
        Some(result) => result,
        None => return Err(AccountError::FRecordMissing),
    };
    let f_record = FRecord::parse(f_data)?;

    // Missing V only loses the names
    let v_data = get_binary(key, "V").unwrap_or_default();

    Ok(AccountRecord {
        relative_id,
        user_name: read_v_string(v_data, V_USER_NAME),
        full_name: read_v_string(v_data, V_FULL_NAME),
        comment: read_v_string(v_data, V_COMMENT),
        created: key_time(key),
        last_logon: f_record.last_logon,
        password_last_set: f_record.password_last_set,
        account_expires: f_record.account_expires,
        last_bad_password: f_record.last_bad_password,
        login_count: f_record.login_count,
        bad_password_count: f_record.bad_password_count,
        control_flags: f_record.control_flags,
        flags: get_flags(f_record.control_flags),
        account_disabled: (f_record.control_flags & ACB_DISABLED) == ACB_DISABLED,
        password_never_expires: (f_record.control_flags & ACB_PASSWORD_NO_EXPIRE)
            == ACB_PASSWORD_NO_EXPIRE,
        credential_hash: hashes.get(&relative_id).cloned(),
        source_location: key.path.clone(),
    })
}
