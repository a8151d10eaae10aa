use super::{
    error::AccountError,
    layout::{
        F_ACCOUNT_EXPIRES, F_BAD_PASSWORD_COUNT, F_CONTROL_FLAGS, F_LAST_BAD_PASSWORD,
        F_LAST_LOGON, F_LOGIN_COUNT, F_MIN_SIZE, F_PASSWORD_LAST_SET, StringRef, V_BASE_OFFSET,
    },
};
use crate::utils::{nom_helper::Field, strings::decode_utf16_lossy, time::decode_filetime};
use common::{time::TemporalValue, windows::AccountFlags};
use log::warn;

/// Account control bit marking a disabled account
pub(crate) const ACB_DISABLED: u32 = 0x1;
/// Account control bit marking a password that never expires
pub(crate) const ACB_PASSWORD_NO_EXPIRE: u32 = 0x200;

/// Decoded SAM user `F` value
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FRecord {
    pub(crate) last_logon: TemporalValue,
    pub(crate) password_last_set: TemporalValue,
    pub(crate) account_expires: TemporalValue,
    pub(crate) last_bad_password: TemporalValue,
    pub(crate) control_flags: u32,
    pub(crate) bad_password_count: u16,
    pub(crate) login_count: u16,
}

impl FRecord {
    /// Parse the `F` value. Anything shorter than the layout is an error for this user only
    pub(crate) fn parse(data: &[u8]) -> Result<FRecord, AccountError> {
        if data.len() < F_MIN_SIZE {
            warn!(
                "[accounts] F value is {} bytes, expected at least {F_MIN_SIZE}",
                data.len()
            );
            return Err(AccountError::FRecordTooShort);
        }

        let filetime = |field: Field| decode_filetime(field.read_u64(data).unwrap_or_default());

        Ok(FRecord {
            last_logon: filetime(F_LAST_LOGON),
            password_last_set: filetime(F_PASSWORD_LAST_SET),
            account_expires: filetime(F_ACCOUNT_EXPIRES),
            last_bad_password: filetime(F_LAST_BAD_PASSWORD),
            control_flags: F_CONTROL_FLAGS.read_u32(data).unwrap_or_default(),
            bad_password_count: F_BAD_PASSWORD_COUNT.read_u16(data).unwrap_or_default(),
            login_count: F_LOGIN_COUNT.read_u16(data).unwrap_or_default(),
        })
    }
}

/// Read one string from the `V` value. Any out of bounds entry means no string
pub(crate) fn read_v_string(data: &[u8], string: StringRef) -> Option<String> {
    let offset = string.offset.read_u32(data)?;
    let length = string.length.read_u32(data)?;
    if length == 0 {
        return None;
    }

    let start = V_BASE_OFFSET.checked_add(usize::try_from(offset).ok()?)?;
    let end = start.checked_add(usize::try_from(length).ok()?)?;
    let value = data.get(start..end)?;
    Some(decode_utf16_lossy(value))
}

/// Determine the account flags. Unknown bits stay in the raw value only
pub(crate) fn get_flags(account_control: u32) -> Vec<AccountFlags> {
    let flag_bits = [
        (ACB_DISABLED, AccountFlags::AccountDisabled),
        (0x2, AccountFlags::HomeDirectoryRequired),
        (0x4, AccountFlags::PasswordNotRequired),
        (0x8, AccountFlags::TempDuplicateAccount),
        (0x10, AccountFlags::NormalAccount),
        (0x20, AccountFlags::MNSLogonAccount),
        (0x40, AccountFlags::InterdomainTrustAccount),
        (0x80, AccountFlags::WorkstationTrustAccount),
        (0x100, AccountFlags::ServerTrustAccount),
        (ACB_PASSWORD_NO_EXPIRE, AccountFlags::DontExpirePassword),
        (0x400, AccountFlags::AccountAutoLocked),
        (0x800, AccountFlags::EncryptedTextPasswordAllowed),
        (0x1000, AccountFlags::SmartcardRequired),
        (0x2000, AccountFlags::TrustedForDelegation),
        (0x4000, AccountFlags::NotDelegated),
        (0x8000, AccountFlags::UseDESKeyOnly),
        (0x10000, AccountFlags::DontRequirePreauth),
        (0x20000, AccountFlags::PasswordExpired),
        (0x40000, AccountFlags::TrustedToAuthenticateForDelegation),
        (0x80000, AccountFlags::NoAuthDataRequired),
        (0x100000, AccountFlags::PartialSecretsAccount),
        (0x200000, AccountFlags::UseAESKeys),
    ];

    flag_bits
        .into_iter()
        .filter(|(bit, _)| (account_control & bit) == *bit)
        .map(|(_, flag)| flag)
        .collect()
}
