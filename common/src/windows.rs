use crate::time::TemporalValue;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub product_name: Option<String>,
    pub edition_id: Option<String>,
    pub hostname: Option<String>,
    pub display_version: Option<String>,
    pub os_build: Option<String>,
    pub build_lab: Option<String>,
    pub install_date: TemporalValue,
    pub system_root: Option<String>,
    pub registered_owner: Option<String>,
    pub registered_organization: Option<String>,
    pub product_id: Option<String>,
    pub time_zone: Option<String>,
    pub source_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountRecord {
    pub relative_id: u32,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub comment: Option<String>,
    pub created: TemporalValue,
    pub last_logon: TemporalValue,
    pub password_last_set: TemporalValue,
    pub account_expires: TemporalValue,
    pub last_bad_password: TemporalValue,
    pub login_count: u16,
    pub bad_password_count: u16,
    /// Raw flags, unknown bits included
    pub control_flags: u32,
    pub flags: Vec<AccountFlags>,
    pub account_disabled: bool,
    pub password_never_expires: bool,
    pub credential_hash: Option<String>,
    pub source_location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AccountFlags {
    AccountDisabled,
    HomeDirectoryRequired,
    PasswordNotRequired,
    TempDuplicateAccount,
    NormalAccount,
    MNSLogonAccount,
    InterdomainTrustAccount,
    WorkstationTrustAccount,
    ServerTrustAccount,
    DontExpirePassword,
    AccountAutoLocked,
    EncryptedTextPasswordAllowed,
    SmartcardRequired,
    TrustedForDelegation,
    NotDelegated,
    UseDESKeyOnly,
    DontRequirePreauth,
    PasswordExpired,
    TrustedToAuthenticateForDelegation,
    NoAuthDataRequired,
    PartialSecretsAccount,
    UseAESKeys,
}

/// A local user bound to its profile directory inside the image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub security_id: String,
    pub user_name: String,
    pub profile_root: PathBuf,
    pub user_hive: PathBuf,
    pub user_class_hive: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkGlobals {
    pub hostname: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ipv4Config {
    pub dhcp_enabled: bool,
    pub addresses: Vec<String>,
    pub subnet_masks: Vec<String>,
    pub gateways: Vec<String>,
    pub dns_servers: Vec<String>,
    pub lease_obtained: TemporalValue,
    pub lease_expires: TemporalValue,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Ipv6Config {
    pub addresses: Vec<String>,
    pub gateways: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkInterfaceRecord {
    pub description: String,
    pub instance_guid: String,
    pub ipv4: Ipv4Config,
    pub ipv6: Ipv6Config,
    active: bool,
}

impl NetworkInterfaceRecord {
    /// Build an interface record. An interface is active if it has any IPv4 or IPv6 address
    pub fn new(
        description: String,
        instance_guid: String,
        ipv4: Ipv4Config,
        ipv6: Ipv6Config,
    ) -> NetworkInterfaceRecord {
        let active = !ipv4.addresses.is_empty() || !ipv6.addresses.is_empty();
        NetworkInterfaceRecord {
            description,
            instance_guid,
            ipv4,
            ipv6,
            active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignatureNamespace {
    Managed,
    Unmanaged,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkProfileRecord {
    pub profile_guid: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub first_connected: TemporalValue,
    pub last_connected: TemporalValue,
    pub gateway_mac: Option<String>,
    pub dns_suffix: Option<String>,
    pub namespace: SignatureNamespace,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsbStorageRecord {
    pub device_class: String,
    pub friendly_name: Option<String>,
    pub serial_short: String,
    pub serial_full: String,
    pub vendor_id: String,
    pub product_id: String,
    pub hardware_ids: Vec<String>,
    /// Whether an enumeration entry was joined to this device
    pub correlated: bool,
    pub first_installed: TemporalValue,
    pub last_connected: TemporalValue,
    pub last_removed: TemporalValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiskRecord {
    pub description: String,
    pub first_installed: TemporalValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortableDeviceRecord {
    pub friendly_name: Option<String>,
    pub manufacturer: Option<String>,
    pub last_connected: TemporalValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunHistorySource {
    UserAssist,
    Bam,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunHistoryEntry {
    pub program_path: String,
    pub run_count: Option<u32>,
    pub last_executed: TemporalValue,
    pub source: RunHistorySource,
    pub source_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MruEntry {
    pub order: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypedPathEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RdpServerEntry {
    pub server: String,
    pub username_hint: Option<String>,
    pub last_updated: TemporalValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenSaveEntry {
    pub extension: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserActivity {
    pub security_id: String,
    pub user_name: String,
    pub user_hive: PathBuf,
    pub userassist: Vec<RunHistoryEntry>,
    pub run_mru: Vec<MruEntry>,
    pub typed_paths: Vec<TypedPathEntry>,
    pub rdp_servers: Vec<RdpServerEntry>,
    /// Directory holding RDP bitmap cache files, if any were found
    pub rdp_cache: Option<PathBuf>,
    pub open_save: Vec<OpenSaveEntry>,
    pub environment: Vec<EnvironmentVariable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BamUser {
    pub security_id: String,
    pub entries: Vec<RunHistoryEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkInfo {
    pub globals: NetworkGlobals,
    pub interfaces: Vec<NetworkInterfaceRecord>,
    pub profiles: Vec<NetworkProfileRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub disks: Vec<DiskRecord>,
    pub usb_storage: Vec<UsbStorageRecord>,
    pub portable_devices: Vec<PortableDeviceRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityInfo {
    pub users: Vec<UserActivity>,
    pub bam: Vec<BamUser>,
    pub system_environment: Vec<EnvironmentVariable>,
}
