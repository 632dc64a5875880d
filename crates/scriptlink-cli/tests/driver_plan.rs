//! Functional tests for the build driver.
//!
//! The driver reads a manifest, links it with the configured linkers, and
//! writes emitted artifacts under the configured directories. These tests
//! run it against temporary directories.

use pretty_assertions::assert_eq;
use scriptlink_artifact::{ArtifactSet, EmittedArtifact, Visibility};
use scriptlink_cli::{link_module, write_emitted, BuildManifest, DriverConfig};
use scriptlink_linker::LinkerRegistry;
use std::fs;

const APP_MANIFEST: &str = r#"{
    "module_name": "App",
    "toolchain_version": "2.9.0",
    "results": [{ "strong_name": "ABCD1234", "fragments": ["alert(1);"] }]
}"#;

/// Tenet: a valid manifest produces `<out_dir>/<module>.nocache.js`.
#[test]
fn writes_single_script() {
    let dir = tempfile::tempdir().unwrap();
    let config = DriverConfig::new().with_out_dir(dir.path().join("war"));
    let manifest = BuildManifest::from_json_str(APP_MANIFEST).unwrap();

    let summary = link_module(&manifest, &config, &LinkerRegistry::with_defaults()).unwrap();

    let script_path = dir.path().join("war").join("App.nocache.js");
    assert_eq!(summary.written, vec![script_path.clone()]);
    assert!(summary.skipped.is_empty());

    let script = fs::read_to_string(script_path).unwrap();
    assert!(script.starts_with("var $_window = this;var $gwt_version = \"2.9.0\";"));
    assert!(script.ends_with("var $strongName = 'ABCD1234';alert(1);gwtOnLoad();"));
}

/// Tenet: pretty output only adds whitespace between statements.
#[test]
fn pretty_output_is_line_per_statement() {
    let dir = tempfile::tempdir().unwrap();
    let config = DriverConfig::new()
        .with_out_dir(dir.path())
        .with_output_compact(false);
    let manifest = BuildManifest::from_json_str(APP_MANIFEST).unwrap();

    link_module(&manifest, &config, &LinkerRegistry::with_defaults()).unwrap();

    let script = fs::read_to_string(dir.path().join("App.nocache.js")).unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "var $_window = this;");
    assert_eq!(lines[1], "");
    assert_eq!(lines[lines.len() - 2], "alert(1);");
    assert_eq!(lines[lines.len() - 1], "gwtOnLoad();");
}

/// Tenet: a failing link writes nothing.
#[test]
fn failed_link_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("war");
    let config = DriverConfig::new().with_out_dir(&out_dir);
    let manifest = BuildManifest::from_json_str(
        r#"{"module_name":"App","results":[{"fragments":["a();","b();"]}]}"#,
    )
    .unwrap();

    let err = link_module(&manifest, &config, &LinkerRegistry::with_defaults()).unwrap_err();

    assert!(format!("{err:#}").contains("exactly one fragment"));
    assert!(!out_dir.exists());
}

/// Tenet: unknown linker names are configuration errors.
#[test]
fn unknown_linker_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = DriverConfig::from_toml_str("linkers = [\"xsiframe\"]\n")
        .unwrap()
        .with_out_dir(dir.path());
    let manifest = BuildManifest::from_json_str(APP_MANIFEST).unwrap();

    let err = link_module(&manifest, &config, &LinkerRegistry::with_defaults()).unwrap_err();
    assert!(err.to_string().contains("unknown linker: xsiframe"));
}

/// Tenet: private artifacts go to the extra directory, or nowhere.
#[test]
fn private_artifacts_follow_extra_dir() {
    let dir = tempfile::tempdir().unwrap();
    let linked: ArtifactSet = [
        EmittedArtifact::new("App.nocache.js", "gwtOnLoad();").unwrap(),
        EmittedArtifact::new("symbolMaps/ABCD.symbolMap", "map")
            .unwrap()
            .with_visibility(Visibility::Private),
    ]
    .into_iter()
    .collect();

    let without_extra = DriverConfig::new().with_out_dir(dir.path().join("war"));
    let summary = write_emitted(&linked, &without_extra).unwrap();
    assert_eq!(summary.skipped, vec!["symbolMaps/ABCD.symbolMap".to_string()]);
    assert_eq!(summary.written.len(), 1);

    let with_extra = without_extra.with_extra_dir(dir.path().join("extra"));
    let summary = write_emitted(&linked, &with_extra).unwrap();
    assert!(summary.skipped.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("extra/symbolMaps/ABCD.symbolMap")).unwrap(),
        "map"
    );
}

/// Tenet: configuration files load from disk.
#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scriptlink.toml");
    fs::write(&path, "out_dir = \"public\"\noutput_compact = false\n").unwrap();

    let config = DriverConfig::load(&path).unwrap();
    assert_eq!(config.out_dir, std::path::PathBuf::from("public"));
    assert!(!config.output_compact);

    assert!(DriverConfig::load(&dir.path().join("missing.toml")).is_err());
}
