//! Properties of generated documents across the render, blocks and core
//! crates.

use confsync_blocks::extract_blocks;
use confsync_core::{ConfigFile, SaveContent, Sections, load_document};
use confsync_fs::MemoryStorage;
use confsync_render::{Record, structured_record};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct Credentials {
    user: String,
    token: String,
}

structured_record!(Credentials {
    user => "User",
    token => "Token",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct Upstream {
    name: String,
    credentials: Credentials,
    mirrors: Vec<Credentials>,
    retries: Vec<u32>,
}

structured_record!(Upstream {
    name => "Name",
    credentials => "Credentials": "Account used to pull",
    mirrors => "Mirrors",
    retries => "Retries",
});

fn upstream() -> Upstream {
    Upstream {
        name: "origin".into(),
        credentials: Credentials {
            user: "bot".into(),
            token: "t0k3n".into(),
        },
        mirrors: vec![Credentials {
            user: "mirror".into(),
            token: "m1rr0r".into(),
        }],
        retries: Vec::new(),
    }
}

fn section(name: &str) -> SaveContent {
    let mut content = SaveContent::new();
    content.add(name, "", &Record::new().field("Value", name));
    content
}

fn document(names: &[&str]) -> String {
    let mut content = SaveContent::new();
    for name in names {
        content.add(*name, "", &Record::new().field("Value", *name));
    }
    content.to_document()
}

#[test]
fn test_whole_document_is_yaml() {
    let mut content = SaveContent::new();
    content
        .add("Upstream", "Where packages come from", &upstream())
        .add("Base", "", &Record::new().field("Name", "svc"));

    let parsed: serde_yaml::Value = serde_yaml::from_str(&content.to_document()).unwrap();
    assert_eq!(parsed["Base"]["Name"].as_str(), Some("svc"));
    assert_eq!(parsed["Upstream"]["Mirrors"][0]["User"].as_str(), Some("mirror"));
    assert_eq!(
        parsed["Upstream"]["Retries"].as_sequence().map(Vec::len),
        Some(0)
    );
}

#[test]
fn test_excluded_fields_absent_at_every_depth() {
    let mut content = SaveContent::new();
    content.add_with_exclude("Upstream", "", &upstream(), ["Token"]);
    let text = content.to_document();

    assert!(!text.contains("Token"));
    assert!(!text.contains("t0k3n"));
    assert!(!text.contains("m1rr0r"));
    assert!(text.contains("User: \"mirror\""));
    assert!(text.contains("  Retries: []\n"));
}

#[test]
fn test_excluded_fields_decode_to_prior_value() {
    let mut content = SaveContent::new();
    content.add_with_exclude("Upstream", "", &upstream(), ["Token"]);

    let mut loaded = Upstream::default();
    load_document(
        &content.to_document(),
        Sections::new().with("Upstream", &mut loaded),
    )
    .unwrap()
    .into_result()
    .unwrap();

    assert_eq!(loaded.name, "origin");
    assert_eq!(loaded.credentials.user, "bot");
    assert_eq!(loaded.credentials.token, "");
    assert_eq!(loaded.mirrors[0].token, "");
}

#[rstest]
#[case(&["A", "B", "C"], &["B", "D"], &["A", "B", "C", "D"])]
#[case(&["A", "B", "C"], &["B", "DB"], &["A", "DB", "B", "C"])]
#[case(&[], &["Base", "X", "DB"], &["Base", "DB", "X"])]
#[case(&["X"], &["DB"], &["DB", "X"])]
#[case(&["Base"], &["DB"], &["Base", "DB"])]
fn test_block_order_after_save(
    #[case] old: &[&str],
    #[case] new: &[&str],
    #[case] expected: &[&str],
) {
    let storage = MemoryStorage::new().with_file("app.yaml", document(old));
    let file = ConfigFile::with_storage("app.yaml", storage);

    let mut content = SaveContent::new();
    for name in new {
        content.add(*name, "", &Record::new().field("Value", &format!("new {name}")));
    }
    file.save(&content).unwrap();

    let text = file.read().unwrap().unwrap();
    let keys: Vec<String> = extract_blocks(&text).iter().map(|b| b.key()).collect();
    assert_eq!(keys, expected);

    for name in new {
        assert!(text.contains(&format!("Value: \"new {name}\"")));
    }
}

#[test]
fn test_saving_same_content_twice_writes_once() {
    let file = ConfigFile::with_storage("app.yaml", MemoryStorage::new());
    let content = section("Base");

    file.save(&content).unwrap();
    file.save(&content).unwrap();
    file.save(&content).unwrap();
    assert_eq!(file.storage().write_count(), 1);
}

#[test]
fn test_crlf_file_loads_and_normalizes_on_save() {
    let crlf = document(&["Base", "Log"]).replace('\n', "\r\n");
    let file = ConfigFile::with_storage(
        "app.yaml",
        MemoryStorage::new().with_file("app.yaml", crlf),
    );

    #[derive(Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase", default)]
    struct Named {
        value: String,
    }

    let mut log = Named::default();
    file.load(Sections::new().with("Log", &mut log))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(log.value, "Log");

    let mut content = section("Base");
    content.add("Log", "", &Record::new().field("Value", "Log"));
    let outcome = file.save(&content).unwrap();
    assert!(outcome.written);
    assert_eq!(file.read().unwrap().unwrap(), document(&["Base", "Log"]));
}
