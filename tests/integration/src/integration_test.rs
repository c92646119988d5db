//! End-to-end application lifecycle across releases.
//!
//! Exercises the full flow on a real file: load -> save -> hand edit ->
//! upgrade to a release with a different set of sections.

use confsync_blocks::BlockAction;
use confsync_core::{ConfigFile, SaveContent, Sections};
use confsync_render::structured_record;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct Base {
    name: String,
    log_level: String,
    labels: HashMap<String, String>,
}

impl Default for Base {
    fn default() -> Self {
        Self {
            name: "ledger".into(),
            log_level: "info".into(),
            labels: HashMap::from([
                ("team".to_string(), "payments".to_string()),
                ("env".to_string(), "dev".to_string()),
            ]),
        }
    }
}

structured_record!(Base {
    name => "Name": "Service name",
    log_level => "LogLevel": "One of trace, debug, info, warn, error",
    labels => "Labels",
});

/// Network settings of release 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct NetworkV1 {
    host: String,
    port: u16,
}

impl Default for NetworkV1 {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

structured_record!(NetworkV1 {
    host => "Host",
    port => "Port": "Listener port",
});

/// Release 2 adds TLS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct NetworkV2 {
    host: String,
    port: u16,
    tls: bool,
}

impl Default for NetworkV2 {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            tls: false,
        }
    }
}

structured_record!(NetworkV2 {
    host => "Host",
    port => "Port": "Listener port",
    tls => "Tls",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct Cache {
    dir: String,
}

structured_record!(Cache { dir => "Dir" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct Db {
    url: String,
    password: String,
}

impl Default for Db {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/ledger".into(),
            password: String::new(),
        }
    }
}

structured_record!(Db {
    url => "Url",
    password => "Password",
});

/// One start of release 1: load what is there, then write back.
fn run_v1(file: &ConfigFile) -> (Base, NetworkV1) {
    let mut base = Base::default();
    let mut network = NetworkV1::default();
    let mut cache = Cache {
        dir: "cache".into(),
    };
    file.load(
        Sections::new()
            .with("Base", &mut base)
            .with("Network", &mut network)
            .with("Cache", &mut cache),
    )
    .unwrap()
    .into_result()
    .unwrap();

    let mut content = SaveContent::new();
    content
        .add("Network", "Listener", &network)
        .add("Cache", "Local cache", &cache)
        .add("Base", "Service identity", &base);
    file.save(&content).unwrap();
    (base, network)
}

/// One start of release 2: Cache retired, DB introduced.
fn run_v2(file: &ConfigFile) -> (Base, NetworkV2, Db) {
    let mut base = Base::default();
    let mut network = NetworkV2::default();
    let mut db = Db::default();
    file.load(
        Sections::new()
            .with("Base", &mut base)
            .with("Network", &mut network)
            .with("DB", &mut db),
    )
    .unwrap()
    .into_result()
    .unwrap();

    let mut content = SaveContent::new();
    content
        .add("Base", "Service identity", &base)
        .add("Network", "Listener", &network)
        .add_with_exclude("DB", "Database", &db, ["Password"]);
    file.save(&content).unwrap();
    (base, network, db)
}

#[test]
fn test_release_upgrade_preserves_user_settings() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("etc/ledger.yaml");
    let file = ConfigFile::open(path.clone());

    // First start creates the file with defaults.
    run_v1(&file);
    let first = fs::read_to_string(&path).unwrap();
    assert!(first.contains("Port: 8080"));

    // A second start changes nothing.
    run_v1(&file);
    assert_eq!(fs::read_to_string(&path).unwrap(), first);

    // The operator edits values by hand.
    let edited = first
        .replace("Port: 8080", "Port: 9443")
        .replace("Dir: \"cache\"", "Dir: \"/var/cache/ledger\"");
    fs::write(&path, &edited).unwrap();

    let (_, network) = run_v1(&file);
    assert_eq!(network.port, 9443);
    assert_eq!(fs::read_to_string(&path).unwrap(), edited);

    // Release 2 keeps the edits and the retired Cache block.
    let (base, network, db) = run_v2(&file);
    assert_eq!(base, Base::default());
    assert_eq!(network.port, 9443);
    assert!(!network.tls);
    assert_eq!(db, Db::default());

    let upgraded = fs::read_to_string(&path).unwrap();
    let keys: Vec<String> = confsync_blocks::extract_blocks(&upgraded)
        .iter()
        .map(|b| b.key())
        .collect();
    assert_eq!(keys, vec!["Base", "DB", "Network", "Cache"]);
    assert!(upgraded.contains("Tls: false"));
    assert!(upgraded.contains("Dir: \"/var/cache/ledger\""));
    assert!(!upgraded.contains("Password"));

    // And settles.
    let before = upgraded.clone();
    run_v2(&file);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_upgrade_actions_reported() {
    let temp = TempDir::new().unwrap();
    let file = ConfigFile::open(temp.path().join("ledger.yaml"));
    run_v1(&file);

    let mut content = SaveContent::new();
    content
        .add("Base", "Service identity", &Base::default())
        .add("Network", "Listener", &NetworkV2::default())
        .add("DB", "Database", &Db::default());
    let outcome = file.save(&content).unwrap();

    assert!(outcome.written);
    assert_eq!(
        outcome.reconciliation.actions,
        vec![
            BlockAction::Replaced,
            BlockAction::Prioritized,
            BlockAction::Replaced,
            BlockAction::Kept,
        ]
    );
}

#[test]
fn test_relative_paths_resolve_next_to_file() {
    let temp = TempDir::new().unwrap();
    let file = ConfigFile::open(temp.path().join("etc/ledger.yaml"));
    run_v1(&file);

    let mut cache = Cache::default();
    file.load(Sections::new().with("Cache", &mut cache))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(
        file.resolve(&cache.dir).to_native(),
        temp.path().join("etc").join("cache")
    );
}
