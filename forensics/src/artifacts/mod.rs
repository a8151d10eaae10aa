pub mod collection;
pub mod os;

pub use os::windows::accounts::hashes::{CredentialSource, NoCredentials, PwdumpFile};
