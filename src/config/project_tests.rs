use std::path::PathBuf;

use tempfile::TempDir;

use super::*;

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

const HOOK_CONFIG: &str = r#"
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: trailing-whitespace
        exclude: ".*"
  - repo: local
    hooks:
      - id: prevent-dangling-todos
        name: Prevent dangling TODOs
        entry: prevent-dangling-todos
        language: system
        args: ["-j", "MYJIRA"]
        files: ^src/
        exclude: ^src/vendor/
        types_or: [python, javascript]
"#;

#[test]
fn no_filter_keeps_everything() {
    let input = paths(&["a.py", "b.bin"]);
    assert_eq!(NoFilter.filter(input.clone()), input);
}

#[test]
fn hook_entry_rules_are_applied() {
    let filter = PreCommitFilter::from_yaml_str(HOOK_CONFIG).unwrap().unwrap();

    let kept = filter.filter(paths(&[
        "src/app.py",
        "src/web/index.js",
        "src/vendor/lib.py",
        "src/style.css",
        "scripts/tool.py",
    ]));

    assert_eq!(kept, paths(&["src/app.py", "src/web/index.js"]));
}

#[test]
fn other_hooks_are_ignored() {
    let yaml = r#"
repos:
  - repo: local
    hooks:
      - id: something-else
        files: ^never/
"#;
    assert!(PreCommitFilter::from_yaml_str(yaml).unwrap().is_none());
}

#[test]
fn types_require_all_tags() {
    let yaml = r#"
repos:
  - repo: local
    hooks:
      - id: prevent-dangling-todos
        types: [text, python]
"#;
    let filter = PreCommitFilter::from_yaml_str(yaml).unwrap().unwrap();
    assert_eq!(
        filter.filter(paths(&["a.py", "b.js", "c.png"])),
        paths(&["a.py"])
    );
}

#[test]
fn exclude_types_drop_matching_files() {
    let yaml = r#"
repos:
  - repo: local
    hooks:
      - id: prevent-dangling-todos
        exclude_types: [markdown, yaml]
"#;
    let filter = PreCommitFilter::from_yaml_str(yaml).unwrap().unwrap();
    assert_eq!(
        filter.filter(paths(&["README.md", "ci.yml", "main.go"])),
        paths(&["main.go"])
    );
}

#[test]
fn top_level_exclude_applies_to_hook() {
    let yaml = r#"
exclude: ^generated/
repos:
  - repo: local
    hooks:
      - id: prevent-dangling-todos
"#;
    let filter = PreCommitFilter::from_yaml_str(yaml).unwrap().unwrap();
    assert_eq!(
        filter.filter(paths(&["generated/api.py", "src/api.py"])),
        paths(&["src/api.py"])
    );
}

#[test]
fn include_alias_is_accepted() {
    let yaml = r#"
repos:
  - repo: local
    hooks:
      - id: prevent-dangling-todos
        include: \.rs$
"#;
    let filter = PreCommitFilter::from_yaml_str(yaml).unwrap().unwrap();
    assert_eq!(
        filter.filter(paths(&["src/lib.rs", "src/lib.py"])),
        paths(&["src/lib.rs"])
    );
}

#[test]
fn malformed_yaml_is_an_error() {
    let result = PreCommitFilter::from_yaml_str("repos: [unclosed");
    assert!(matches!(result, Err(TodoGuardError::YamlParse(_))));
}

#[test]
fn invalid_regex_is_an_error() {
    let yaml = r#"
repos:
  - repo: local
    hooks:
      - id: prevent-dangling-todos
        files: "(unclosed"
"#;
    let result = PreCommitFilter::from_yaml_str(yaml);
    assert!(matches!(result, Err(TodoGuardError::InvalidPattern { .. })));
}

#[test]
fn empty_content_means_no_rules() {
    assert!(PreCommitFilter::from_yaml_str("   \n").unwrap().is_none());
}

#[test]
fn load_missing_file_is_none() {
    let dir = TempDir::new().unwrap();
    let result = PreCommitFilter::load(&dir.path().join(".pre-commit-config.yaml")).unwrap();
    assert!(result.is_none());
}

#[test]
fn load_reads_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".pre-commit-config.yaml");
    std::fs::write(&path, HOOK_CONFIG).unwrap();

    let filter = PreCommitFilter::load(&path).unwrap().unwrap();
    assert_eq!(filter.filter(paths(&["docs/a.py"])), Vec::<PathBuf>::new());
}
