use crate::common::{TestWorkspace, stdout_of};

#[test]
fn test_git_help_documents_columns_and_keys() {
    let workspace = TestWorkspace::new();
    let output = stdout_of(&workspace.lz(&["git", "--help"]).output().unwrap());

    for section in ["DISCOVERY:", "COLUMNS:", "FILES:", "KEYS:", "--list"] {
        assert!(output.contains(section), "missing {section}:\n{output}");
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    let workspace = TestWorkspace::new();
    let output = workspace.lz(&["frobnicate"]).output().unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frobnicate"));
}
