//! Integration tests for the zettelgraph CLI using fixture vaults.

use std::path::{Path, PathBuf};
use std::process::Command;

const OWNERSHIP: &str = "20220729205531-ownership";

/// Get the path to a fixture vault.
fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

/// Run the CLI against `vault` and return stdout, stderr and the exit code.
fn run_in(vault: &Path, args: &[&str]) -> (String, String, i32) {
    let binary = env!("CARGO_BIN_EXE_zettelgraph");

    let output = Command::new(binary)
        .arg("--vault")
        .arg(vault)
        .args(args)
        .env("ZETTELGRAPH_CONFIG", "/nonexistent/zettelgraph/config.toml")
        .env_remove("ZETTELGRAPH_VAULT")
        .env_remove("ZETTELGRAPH_LOG")
        .output()
        .expect("Failed to execute zettelgraph");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_zettelgraph(vault: &str, args: &[&str]) -> (String, String, i32) {
    run_in(&fixture_path(vault), args)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout should be valid JSON")
}

fn strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

mod graph_command {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn graph_with_backlinks() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["graph", OWNERSHIP]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(json["root"], OWNERSHIP);
        assert_eq!(
            strings(&json["nodes"]),
            vec![
                OWNERSHIP,
                "topics/rust/borrowing",
                "topics/rust/lifetimes",
                "topics/rust/traits",
                "zettelKasten",
            ]
        );
        assert_eq!(strings(&json["missing"]), vec!["topics/rust/lifetimes"]);
        assert_eq!(json["backlink_edges"], 3);

        let edges = json["edges"].as_array().unwrap();
        assert!(edges.iter().any(|e| e["from"] == "topics/rust/traits" && e["to"] == OWNERSHIP));
        assert!(!edges.iter().any(|e| e["from"] == "zettelKasten" && e["to"] == "topics/rust/traits"));
    }

    #[test]
    fn graph_without_backlinks() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["graph", OWNERSHIP, "--no-backlinks"]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(json["backlink_edges"], 0);
        assert!(!strings(&json["nodes"]).contains(&"topics/rust/traits".to_string()));
    }

    #[test]
    fn graph_never_contains_external_nodes() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["g", OWNERSHIP]);
        assert_eq!(code, 0);

        for node in strings(&parse_json(&stdout)["nodes"]) {
            assert!(!node.starts_with("http"), "{node}");
            assert!(!node.starts_with("file"), "{node}");
            assert!(!node.starts_with('~'), "{node}");
        }
    }

    #[test]
    fn graph_depth_bound() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["graph", OWNERSHIP, "--max-depth", "1", "--no-backlinks"]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(
            strings(&json["visited"]),
            vec![OWNERSHIP, "topics/rust/borrowing", "zettelKasten"]
        );
        assert!(strings(&json["nodes"]).contains(&"topics/rust/lifetimes".to_string()));
        assert!(strings(&json["missing"]).is_empty());
    }

    #[test]
    fn graph_by_file_path() {
        let path = fixture_path("zettel").join("topics/rust/borrowing.md");
        let (stdout, _, code) = run_zettelgraph("zettel", &["graph", path.to_str().unwrap(), "--no-backlinks"]);
        assert_eq!(code, 0);
        assert_eq!(parse_json(&stdout)["root"], "topics/rust/borrowing");
    }

    #[test]
    fn graph_dot_output() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["graph", OWNERSHIP, "--dot"]);
        assert_eq!(code, 0);
        assert!(stdout.starts_with("digraph zettelgraph {"));
        assert!(stdout.contains(&format!("\"zettelKasten\" -> \"{OWNERSHIP}\";")));
        assert!(stdout.contains("fillcolor=lightblue"));
        assert!(stdout.trim_end().ends_with('}'));
    }

    #[test]
    fn graph_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("graph.dot");
        let (stdout, _, code) = run_zettelgraph(
            "zettel",
            &["graph", OWNERSHIP, "--dot", "--output", target.to_str().unwrap()],
        );
        assert_eq!(code, 0);
        assert!(stdout.is_empty());

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("digraph zettelgraph {"));
    }

    #[test]
    fn graph_yaml_output() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["--yaml", "graph", OWNERSHIP]);
        assert_eq!(code, 0);
        assert!(stdout.contains(&format!("root: {OWNERSHIP}")));
    }

    #[test]
    fn graph_missing_root() {
        let (_, stderr, code) = run_zettelgraph("zettel", &["graph", "does-not-exist"]);
        assert_eq!(code, 2); // NOTE_NOT_FOUND exit code
        assert!(stderr.contains("not found"));
    }

    #[test]
    fn graph_root_outside_vault() {
        let dir = tempfile::TempDir::new().unwrap();
        let outside = dir.path().join("stray.md");
        std::fs::write(&outside, "[[zettelKasten]]").unwrap();

        let (_, _, code) = run_zettelgraph("zettel", &["graph", outside.to_str().unwrap()]);
        assert_eq!(code, 6); // INVALID_PATH exit code
    }

    #[test]
    fn graph_sample_limit_zero_rejected() {
        let (_, _, code) = run_zettelgraph("zettel", &["graph", OWNERSHIP, "--sample-limit", "0"]);
        assert_ne!(code, 0);
    }
}

mod graph_on_temp_vault {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cycle_terminates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "[b](b.md)").unwrap();
        fs::write(dir.path().join("b.md"), "[c](c.md)").unwrap();
        fs::write(dir.path().join("c.md"), "[a](a.md)").unwrap();

        let (stdout, _, code) = run_in(dir.path(), &["graph", "a", "--no-backlinks"]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(strings(&json["visited"]), vec!["a", "b", "c"]);
        assert_eq!(json["edges"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn sampling_caps_wide_notes() {
        let dir = TempDir::new().unwrap();
        let links: String = (0..6001).map(|i| format!("[[n{i}]]\n")).collect();
        fs::write(dir.path().join("hub.md"), links).unwrap();

        let (stdout, _, code) = run_in(dir.path(), &["-q", "graph", "hub", "--no-backlinks"]);
        assert_eq!(code, 0);
        assert_eq!(parse_json(&stdout)["edges"].as_array().unwrap().len(), 6000);
    }

    #[test]
    fn dot_collapse_duplicates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hub.md"), "[[a]] and [a](a.md) again").unwrap();
        fs::write(dir.path().join("a.md"), "leaf").unwrap();

        let (stdout, _, code) = run_in(dir.path(), &["graph", "hub", "--dot", "--no-backlinks"]);
        assert_eq!(code, 0);
        assert_eq!(stdout.matches("\"hub\" -> \"a\";").count(), 2);

        let (stdout, _, code) = run_in(dir.path(), &["graph", "hub", "--dot", "--collapse", "--no-backlinks"]);
        assert_eq!(code, 0);
        assert_eq!(stdout.matches("\"hub\" -> \"a\";").count(), 1);
    }

    #[test]
    fn sample_limit_flag() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hub.md"), "[[a]] [[b]] [[c]] [[d]]").unwrap();

        let (stdout, _, code) = run_in(dir.path(), &["-q", "graph", "hub", "--sample-limit", "2", "--no-backlinks"]);
        assert_eq!(code, 0);
        assert_eq!(parse_json(&stdout)["edges"].as_array().unwrap().len(), 2);
    }
}

mod links_command {
    use super::*;

    #[test]
    fn links_lists_all_references() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["links", OWNERSHIP]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        let links = json["links"].as_array().unwrap();
        assert_eq!(links.len(), 3);

        assert_eq!(links[0]["kind"], "markdown");
        assert_eq!(links[0]["note"], "topics/rust/borrowing");
        assert_eq!(links[1]["external"], true);
        assert!(links[1].get("note").is_none());
        assert_eq!(links[2]["kind"], "wiki");
        assert_eq!(links[2]["note"], "zettelKasten");
    }

    #[test]
    fn links_relative_destinations() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["l", "topics/rust/borrowing"]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        let links = json["links"].as_array().unwrap();
        assert_eq!(links[0]["note"], OWNERSHIP);
        assert_eq!(links[1]["note"], "topics/rust/lifetimes");
    }
}

mod backlinks_command {
    use super::*;

    #[test]
    fn backlinks_use_zettel_id() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["backlinks", OWNERSHIP]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(json["term"], "20220729205531");
        let mentions = json["mentions"].as_array().unwrap();
        assert_eq!(mentions.len(), 4);
        assert!(mentions.iter().all(|m| m["text"].as_str().unwrap().contains("20220729205531")));
    }

    #[test]
    fn backlinks_missing_note() {
        let (_, _, code) = run_zettelgraph("zettel", &["b", "nope"]);
        assert_eq!(code, 2);
    }
}

mod link_ratio_command {
    use super::*;

    #[test]
    fn link_ratio_counts() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["link-ratio", "topics/rust/borrowing"]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(json["links"], 2);
        let words = json["words"].as_u64().unwrap();
        assert_eq!(json["ratio"].as_u64().unwrap(), words / 2);
    }
}

mod global_options {
    use super::*;

    #[test]
    fn missing_vault() {
        let (_, stderr, code) = run_in(Path::new("/definitely/not/a/vault"), &["links", "x"]);
        assert_eq!(code, 1);
        assert!(stderr.contains("Vault not found"));
    }

    #[test]
    fn toml_output() {
        let (stdout, _, code) = run_zettelgraph("zettel", &["--toml", "link-ratio", "zettelKasten"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("note = \"zettelKasten\""));
    }
}
