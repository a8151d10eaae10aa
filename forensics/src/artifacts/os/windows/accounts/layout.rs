//! Fixed offsets of the SAM user `F` and `V` values

use crate::utils::nom_helper::Field;

pub(crate) const F_LAST_LOGON: Field = Field::new(8, 8);
pub(crate) const F_PASSWORD_LAST_SET: Field = Field::new(24, 8);
pub(crate) const F_ACCOUNT_EXPIRES: Field = Field::new(32, 8);
pub(crate) const F_LAST_BAD_PASSWORD: Field = Field::new(40, 8);
pub(crate) const F_CONTROL_FLAGS: Field = Field::new(48, 4);
pub(crate) const F_BAD_PASSWORD_COUNT: Field = Field::new(64, 2);
pub(crate) const F_LOGIN_COUNT: Field = Field::new(66, 2);

/// Smallest `F` value that holds every field
pub(crate) const F_MIN_SIZE: usize = F_LOGIN_COUNT.end();

/// `V` strings are stored relative to the end of the `V` header
pub(crate) const V_BASE_OFFSET: usize = 0xCC;

/// Location of the offset and length entries describing one `V` string
#[derive(Debug, Clone, Copy)]
pub(crate) struct StringRef {
    pub(crate) offset: Field,
    pub(crate) length: Field,
}

pub(crate) const V_USER_NAME: StringRef = StringRef {
    offset: Field::new(12, 4),
    length: Field::new(16, 4),
};
pub(crate) const V_FULL_NAME: StringRef = StringRef {
    offset: Field::new(24, 4),
    length: Field::new(28, 4),
};
pub(crate) const V_COMMENT: StringRef = StringRef {
    offset: Field::new(36, 4),
    length: Field::new(40, 4),
};
