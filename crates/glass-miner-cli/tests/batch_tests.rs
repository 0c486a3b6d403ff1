//! End-to-end batch driver tests with a mock generator.
//!
//! These exercise the whole per-file pipeline (read → prompt → generate →
//! parse → persist) against a temp directory, without loading a model.

use std::fs;
use std::path::Path;

use glass_miner_cli::run_batch;
use glass_miner_core::{ExtractionOutput, RunConfig};
use glass_miner_llm::host::MockGenerator;

const VALID_GENERATION: &str = concat!(
    "Scanning the paper for compositions...</think>\n",
    "Extracted data:\n",
    r#"{"compositions":{"SeTe-30":{"type":"raw","percentage_type":"atomic","formula":"Se₇₀Te₃₀","x":null,"composition":{"Se":70.0,"Te":30.0},"properties":{"Eg":{"full_name":"Optical Bandgap","value":2.1,"unit":"eV","measurement_method":"Not specified"}}}}}"#,
);

fn setup(dir: &Path, files: &[(&str, &str)]) -> RunConfig {
    let config = RunConfig {
        input_dir: dir.join("papers"),
        output_dir: dir.join("resp"),
        ..RunConfig::default()
    };
    fs::create_dir_all(&config.input_dir).unwrap();
    for (name, content) in files {
        fs::write(config.input_dir.join(name), content).unwrap();
    }
    config
}

fn output_names(config: &RunConfig) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(&config.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn one_output_per_successful_input() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(
        tmp.path(),
        &[("a.xml", "paper a"), ("b.xml", "paper b"), ("c.xml", "paper c")],
    );

    let generator = MockGenerator::new(VALID_GENERATION);
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 3);
    assert_eq!(output_names(&config), vec!["a.json", "b.json", "c.json"]);
}

#[test]
fn outputs_never_exceed_inputs() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("a.xml", "fine"), ("b.xml", "broken paper")]);

    // Generation for b fails outright.
    let generator = MockGenerator::new(VALID_GENERATION).fail_when_contains("broken paper");
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(output_names(&config), vec!["a.json"]);
}

#[test]
fn failure_on_one_file_does_not_stop_the_others() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(
        tmp.path(),
        &[
            ("a.xml", "first paper"),
            ("b.xml", "poisoned paper"),
            ("c.xml", "third paper"),
        ],
    );

    let generator = MockGenerator::new(VALID_GENERATION).fail_when_contains("poisoned");
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].file, "b.xml");
    assert_eq!(output_names(&config), vec!["a.json", "c.json"]);
}

#[test]
fn persisted_output_is_valid_schema_json() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("paper.xml", "Se70Te30 study")]);

    let generator = MockGenerator::new(VALID_GENERATION);
    run_batch(&config, &generator).unwrap();

    let written = fs::read_to_string(config.output_dir.join("paper.json")).unwrap();
    let output: ExtractionOutput = serde_json::from_str(&written).unwrap();
    assert!(output.validate().is_ok());
    assert_eq!(output.compositions["SeTe-30"].composition["Se"], 70.0);
}

#[test]
fn empty_object_generation_persists_empty_output() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("nothing.xml", "no glass here")]);

    let generator = MockGenerator::new("thinking...</think>{}");
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.succeeded, 1);
    let written = fs::read_to_string(config.output_dir.join("nothing.json")).unwrap();
    let output: ExtractionOutput = serde_json::from_str(&written).unwrap();
    assert!(output.is_empty());
}

#[test]
fn markerless_generation_still_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("paper.xml", "text")]);

    // No </think> marker: the whole generation is treated as the answer.
    let generator = MockGenerator::new(r#"{"compositions":{}}"#);
    let report = run_batch(&config, &generator).unwrap();
    assert_eq!(report.succeeded, 1);
}

#[test]
fn payloadless_generation_fails_that_file_only() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("paper.xml", "text")]);

    let generator = MockGenerator::new("</think>the model rambled with no JSON");
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.attempted, 1);
    assert!(report.all_failed());
    assert!(output_names(&config).is_empty());
}

#[test]
fn dotless_file_name_uses_whole_name_as_stem() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("README", "content")]);

    let generator = MockGenerator::new("</think>{}");
    run_batch(&config, &generator).unwrap();
    assert_eq!(output_names(&config), vec!["README.json"]);
}

#[test]
fn stem_is_text_before_first_dot() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("paper.tar.xml", "content")]);

    let generator = MockGenerator::new("</think>{}");
    run_batch(&config, &generator).unwrap();
    assert_eq!(output_names(&config), vec!["paper.json"]);
}

#[test]
fn rerun_produces_the_same_file_names() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("a.xml", "paper"), ("b.xml", "paper")]);

    let generator = MockGenerator::new(VALID_GENERATION);
    run_batch(&config, &generator).unwrap();
    let first = output_names(&config);

    run_batch(&config, &generator).unwrap();
    assert_eq!(output_names(&config), first);
}

#[test]
fn subdirectories_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("a.xml", "paper")]);
    fs::create_dir(config.input_dir.join("nested")).unwrap();

    let generator = MockGenerator::new(VALID_GENERATION);
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.attempted, 1);
    assert_eq!(output_names(&config), vec!["a.json"]);
}

#[test]
fn unreadable_file_fails_that_file_only() {
    let tmp = tempfile::tempdir().unwrap();
    let config = setup(tmp.path(), &[("good.xml", "paper")]);
    // Invalid UTF-8 makes read_to_string fail.
    fs::write(config.input_dir.join("bad.xml"), [0xff, 0xfe, 0x00]).unwrap();

    let generator = MockGenerator::new(VALID_GENERATION);
    let report = run_batch(&config, &generator).unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed[0].file, "bad.xml");
    assert_eq!(output_names(&config), vec!["good.json"]);
}
