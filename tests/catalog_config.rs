// tests/catalog_config.rs
use std::{env, fs};

use tech_trends::config::AppConfig;
use tech_trends::ingest::catalog::{default_catalog, load_catalog, load_catalog_from};
use tech_trends::model::Category;

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("catalog.toml");
    fs::write(
        &p_toml,
        r#"
[[entries]]
query = "quantum computing startups"
category = "startups"
num_results = 5
"#,
    )
    .unwrap();
    let v = load_catalog_from(&p_toml).unwrap();
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].category, Category::Startups);
    assert_eq!(v[0].num_results, 5);

    let p_json = dir.path().join("catalog.json");
    fs::write(
        &p_json,
        r#"[{"query": "llm tooling", "category": "ai", "num_results": 3}, {"query": " ", "category": "ai"}]"#,
    )
    .unwrap();
    let vj = load_catalog_from(&p_json).unwrap();
    assert_eq!(vj.len(), 1);
    assert_eq!(vj[0].query, "llm tooling");
}

#[test]
fn garbage_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("catalog.toml");
    fs::write(&p, "this is not a catalog").unwrap();
    assert!(load_catalog_from(&p).is_err());
}

#[test]
fn extensionless_file_is_sniffed() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("catalog");
    fs::write(&p, "[[entries]]\nquery = \"chips\"\ncategory = \"ai\"\n").unwrap();
    assert_eq!(load_catalog_from(&p).unwrap()[0].query, "chips");
}

#[serial_test::serial]
#[test]
fn explicit_path_then_config_dir_then_builtin() {
    // Isolate CWD so the repo's own config/ does not interfere.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    // 1) Nothing on disk → built-in catalog
    let v = load_catalog(None).unwrap();
    assert_eq!(v, default_catalog());

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("trends_catalog.toml"),
        "[[entries]]\nquery = \"robotics\"\ncategory = \"engineering\"\n",
    )
    .unwrap();
    let vt = load_catalog(None).unwrap();
    assert_eq!(vt.len(), 1);
    assert_eq!(vt[0].query, "robotics");

    // 3) Explicit path takes precedence
    let p_explicit = tmp.path().join("override.json");
    fs::write(&p_explicit, r#"[{"query": "x", "category": "general"}]"#).unwrap();
    let ve = load_catalog(Some(&p_explicit)).unwrap();
    assert_eq!(ve[0].query, "x");

    // 4) Explicit path pointing nowhere is an error
    assert!(load_catalog(Some(&tmp.path().join("missing.toml"))).is_err());

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn config_from_process_env() {
    env::set_var("GOOGLE_SEARCH_API_KEY", "k");
    env::set_var("GOOGLE_SEARCH_ENGINE_ID", "cx");
    env::set_var("GOOGLE_TRENDS_REGION", "DE");
    env::set_var("TRENDS_BATCH_SIZE", "3");
    env::set_var("TRENDS_CATALOG_PATH", "catalogs/weekly.toml");
    env::remove_var("OPENAI_API_KEY");
    env::remove_var("AI_TEST_MODE");

    let cfg = AppConfig::from_env();
    assert!(cfg.search.is_configured());
    assert_eq!(cfg.search.region, "DE");
    assert!(!cfg.ai.is_configured());
    assert_eq!(cfg.policy.batch_size, 3);
    assert_eq!(
        cfg.catalog_path.as_deref(),
        Some(std::path::Path::new("catalogs/weekly.toml"))
    );

    for k in [
        "GOOGLE_SEARCH_API_KEY",
        "GOOGLE_SEARCH_ENGINE_ID",
        "GOOGLE_TRENDS_REGION",
        "TRENDS_BATCH_SIZE",
        "TRENDS_CATALOG_PATH",
    ] {
        env::remove_var(k);
    }
}
