use super::{
    environment::{grab_system_environment, grab_user_environment},
    error::ActivityError,
    mru::{grab_run_mru, grab_typed_paths},
    opensave::grab_open_save,
    rdp::{find_rdp_cache, grab_rdp_servers},
};
use crate::{
    artifacts::os::windows::{bam::parser::grab_bam, userassist::parser::grab_userassist},
    hive::{controlset::SystemHive, locate::open_hive_file, store::HiveStore},
    utils::diagnostics::Diagnostics,
};
use common::windows::{ActivityInfo, UserActivity, UserProfile};
use log::debug;
use std::fmt::Display;

/// Per user activity from every profile with a NTUSER.DAT hive, plus BAM and system environment from SYSTEM
pub(crate) fn grab_activity(
    profiles: &[UserProfile],
    system: Option<&SystemHive>,
    diag: &mut Diagnostics,
) -> Result<ActivityInfo, ActivityError> {
    let mut users = Vec::new();
    for profile in profiles {
        let ntuser = match open_hive_file(&profile.user_hive) {
            Ok(Some(result)) => result,
            Ok(None) => {
                debug!(
                    "[activity] No NTUSER.DAT for {} at {:?}",
                    profile.user_name, profile.user_hive
                );
                continue;
            }
            Err(err) => {
                diag.warning(
                    "activity",
                    format!("Could not open NTUSER.DAT for {}: {err}", profile.user_name),
                );
                continue;
            }
        };
        users.push(user_activity(profile, ntuser.as_ref(), diag));
    }

    let (bam, system_environment) = match system {
        Some(system) => (
            soft(grab_bam(system), "bam", diag),
            soft(grab_system_environment(system), "system environment", diag),
        ),
        None => {
            diag.info(
                "activity",
                String::from("SYSTEM hive not found, skipping BAM and system environment"),
            );
            (Vec::new(), Vec::new())
        }
    };

    Ok(ActivityInfo {
        users,
        bam,
        system_environment,
    })
}

fn user_activity(profile: &UserProfile, ntuser: &dyn HiveStore, diag: &mut Diagnostics) -> UserActivity {
    UserActivity {
        security_id: profile.security_id.clone(),
        user_name: profile.user_name.clone(),
        user_hive: profile.user_hive.clone(),
        userassist: soft(grab_userassist(ntuser, diag), "userassist", diag),
        run_mru: soft(grab_run_mru(ntuser), "RunMRU", diag),
        typed_paths: soft(grab_typed_paths(ntuser), "TypedPaths", diag),
        rdp_servers: soft(grab_rdp_servers(ntuser), "RDP servers", diag),
        rdp_cache: find_rdp_cache(&profile.profile_root),
        open_save: soft(grab_open_save(ntuser), "OpenSavePidlMRU", diag),
        environment: soft(grab_user_environment(ntuser), "user environment", diag),
    }
}

/// A failed section is recorded and left empty, the rest of the report continues
fn soft<T, E: Display>(result: Result<Vec<T>, E>, section: &str, diag: &mut Diagnostics) -> Vec<T> {
    match result {
        Ok(result) => result,
        Err(err) => {
            diag.warning("activity", format!("Could not read {section}: {err}"));
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::grab_activity;
    use crate::{
        hive::{controlset::SystemHive, memory::MemoryHive, store::ValueData},
        utils::diagnostics::Diagnostics,
    };
    use common::windows::UserProfile;
    use std::path::PathBuf;

    fn profile(name: &str) -> UserProfile {
        let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        root.push("tests/test_data/image/Users");
        root.push(name);
        UserProfile {
            security_id: format!("S-1-5-21-1-2-3-{}", name.len()),
            user_name: name.to_string(),
            user_hive: root.join("NTUSER.DAT"),
            user_class_hive: root.join("AppData/Local/Microsoft/Windows/UsrClass.dat"),
            profile_root: root,
        }
    }

    #[test]
    fn test_grab_activity() {
        let mut hive = MemoryHive::new();
        hive.add_value("Select", "Current", ValueData::Dword(1)).add_value(
            "ControlSet001\\Control\\Session Manager\\Environment",
            "OS",
            ValueData::String(String::from("Windows_NT")),
        );
        let system = SystemHive::open(Box::new(hive)).unwrap();

        let profiles = [profile("alice"), profile("nobody")];
        let mut diag = Diagnostics::new();
        let activity = grab_activity(&profiles, Some(&system), &mut diag).unwrap();

        assert_eq!(activity.users.len(), 1);
        let alice = &activity.users[0];
        assert_eq!(alice.user_name, "alice");
        assert!(!alice.userassist.is_empty());
        assert!(alice.rdp_cache.is_some());
        assert_eq!(activity.system_environment.len(), 1);
        assert!(activity.bam.is_empty());
    }

    #[test]
    fn test_grab_activity_without_system() {
        let mut diag = Diagnostics::new();
        let activity = grab_activity(&[], None, &mut diag).unwrap();
        assert!(activity.users.is_empty());
        assert_eq!(diag.events().len(), 1);
    }
}
