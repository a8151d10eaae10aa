use forensics::{
    artifacts::collection::{ReportKind, run_report},
    artifacts::NoCredentials,
    core::{parse_toml_data, parse_toml_file},
    hive::locate::ImageHives,
};
use std::path::PathBuf;

fn image_root() -> PathBuf {
    let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    test_location.push("tests/test_data/image");
    test_location
}

#[test]
fn test_regalyzer_toml() {
    let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    test_location.push("tests/test_data/regalyzer.toml");

    let summary = parse_toml_file(&test_location.display().to_string()).unwrap();
    assert_eq!(summary.ran_count(), 2);

    let accounts = summary
        .outcomes
        .iter()
        .find(|outcome| outcome.kind == ReportKind::Accounts)
        .unwrap();
    let report = accounts.result.as_ref().unwrap();
    assert_eq!(report.record_count, 2);
    assert_eq!(report.records[1]["user_name"], "alice");
    assert_eq!(
        report.records[1]["credential_hash"],
        "64f12cddaa88057e06a81b54e73b949b"
    );
}

#[test]
fn test_regalyzer_all_reports() {
    let toml = format!(
        "[analysis]\nimage_root = {:?}\n",
        image_root().display().to_string()
    );
    let summary = parse_toml_data(toml.as_bytes()).unwrap();
    assert_eq!(summary.outcomes.len(), 5);
    assert!(summary.success());
}

#[test]
fn test_system_report() {
    let hives = ImageHives::new(&image_root());
    let report = run_report(ReportKind::System, &hives, &NoCredentials).unwrap();
    assert_eq!(report.records["product_name"], "Windows 10 Pro");
    assert_eq!(report.records["os_build"], "19045.2486");
    assert_eq!(report.records["install_date"], "2023-01-15 10:30:00");
    assert_eq!(
        report.records["time_zone"],
        "Pacific Standard Time (UTC-08:00)"
    );
}

#[test]
fn test_network_report() {
    let hives = ImageHives::new(&image_root());
    let report = run_report(ReportKind::Network, &hives, &NoCredentials).unwrap();
    let interface = &report.records["interfaces"][0];
    assert_eq!(interface["ipv4"]["addresses"][0], "192.168.1.50");
    assert_eq!(interface["ipv4"]["lease_obtained"], "2023-01-15 10:30:00");
    assert_eq!(interface["ipv6"]["addresses"][0], "2001:db8::5");

    let profile = &report.records["profiles"][0];
    assert_eq!(profile["name"], "HomeWiFi");
    assert_eq!(profile["gateway_mac"], "00:1A:2B:3C:4D:5E");
    assert_eq!(profile["first_connected"], "2023-01-15 10:30:00");
}

#[test]
fn test_storage_report() {
    let hives = ImageHives::new(&image_root());
    let report = run_report(ReportKind::Storage, &hives, &NoCredentials).unwrap();
    let usb = &report.records["usb_storage"][0];
    assert_eq!(usb["correlated"], true);
    assert_eq!(usb["product_id"], "5583");
    assert_eq!(usb["last_removed"], "2020-01-01 06:09:36");
    assert_eq!(
        report.records["disks"][0]["description"],
        "Samsung SSD 970 EVO Plus 500GB"
    );
}

#[test]
fn test_activity_report() {
    let hives = ImageHives::new(&image_root());
    let report = run_report(ReportKind::Activity, &hives, &NoCredentials).unwrap();
    let alice = &report.records["users"][0];
    assert_eq!(
        alice["userassist"][0]["program_path"],
        "C:\\Windows\\System32\\notepad.exe"
    );
    assert_eq!(alice["userassist"][0]["run_count"], 3);
    assert_eq!(alice["run_mru"][0]["value"], "cmd\\1");
    assert_eq!(alice["open_save"][0]["path"], "C:\\Users\\report.docx");
    assert_eq!(alice["rdp_servers"][0]["server"], "10.0.0.5");
    assert_eq!(
        report.records["bam"][0]["entries"][0]["last_executed"],
        "2020-01-01 06:09:36"
    );
}
