use crate::common::{TestWorkspace, dots, stdout_of};

fn list(workspace: &TestWorkspace, args: &[&str]) -> String {
    stdout_of(&workspace.lz(args).output().expect("Failed to run lz"))
}

fn lines(expected: &[String]) -> String {
    expected.iter().map(|line| format!("{line}\n")).collect()
}

#[test]
fn test_list_dirty_repos_first() {
    let workspace = TestWorkspace::new();
    workspace.add_repo("alpha");
    let beta = workspace.add_repo("beta");
    workspace.write(&beta, "README.md", "# changed\n");
    workspace.write(&beta, "notes.md", "todo\n");

    let output = list(&workspace, &["git", "--list"]);

    assert_eq!(
        output,
        lines(&[
            format!("── beta {} main 2d ∅", dots(42)),
            "   M README.md".to_string(),
            "   ? notes.md".to_string(),
            String::new(),
            format!("── alpha {} main 2d ∅", dots(41)),
        ])
    );
}

#[test]
fn test_list_clean_repos_have_no_separator() {
    let workspace = TestWorkspace::new();
    workspace.add_repo("one");
    workspace.add_repo("two");

    let output = list(&workspace, &["git", "--list"]);

    assert_eq!(
        output,
        lines(&[
            format!("── one {} main 2d ∅", dots(43)),
            format!("── two {} main 2d ∅", dots(43)),
        ])
    );
}

#[test]
fn test_list_alias_and_piped_stdout() {
    let workspace = TestWorkspace::new();
    workspace.add_repo("solo");

    let expected = lines(&[format!("── solo {} main 2d ∅", dots(42))]);
    assert_eq!(list(&workspace, &["g", "-l"]), expected);
    // Without --list, a non-terminal stdout still gets the printed list
    assert_eq!(list(&workspace, &["git"]), expected);
}

#[test]
fn test_list_tag_and_stash_columns() {
    let workspace = TestWorkspace::new();
    let tools = workspace.add_repo("tools");
    workspace.git(&tools, &["tag", "v1.0"]);
    workspace.write(&tools, "README.md", "# stashed\n");
    workspace.git(&tools, &["stash"]);

    let output = list(&workspace, &["git", "--list"]);

    assert_eq!(
        output,
        lines(&[format!("── tools {} main 2d ∅ ≡1 @v1.0", dots(32))])
    );
}

#[test]
fn test_list_ahead_of_upstream() {
    let workspace = TestWorkspace::new();
    let api = workspace.add_repo("api");

    let remote = workspace.outside_path().join("api.git");
    std::fs::create_dir(&remote).unwrap();
    workspace.git(&remote, &["init", "--bare", "-b", "main"]);
    workspace.git(&api, &["remote", "add", "origin", remote.to_str().unwrap()]);
    workspace.git(&api, &["push", "-u", "origin", "main"]);

    workspace.write(&api, "README.md", "# second\n");
    workspace.git(&api, &["commit", "-am", "Second commit"]);

    let output = list(&workspace, &["git", "--list"]);

    assert_eq!(
        output,
        lines(&[format!("── api {} main 2d ↑1", dots(42))])
    );
}

#[test]
fn test_list_rename_uses_arrow() {
    let workspace = TestWorkspace::new();
    let docs = workspace.add_repo("docs");
    workspace.git(&docs, &["mv", "README.md", "GUIDE.md"]);

    let output = list(&workspace, &["git", "--list"]);

    assert_eq!(
        output,
        lines(&[
            format!("── docs {} main 2d ∅", dots(42)),
            "   R README.md → GUIDE.md".to_string(),
        ])
    );
}

#[test]
fn test_list_paths_are_not_quoted() {
    let workspace = TestWorkspace::new();
    let alpha = workspace.add_repo("alpha");
    workspace.write(&alpha, "a b.txt", "spaced\n");
    workspace.write(&alpha, "café.txt", "accent\n");

    let output = list(&workspace, &["git", "--list"]);

    assert_eq!(
        output,
        lines(&[
            format!("── alpha {} main 2d ∅", dots(41)),
            "   ? a b.txt".to_string(),
            "   ? café.txt".to_string(),
        ])
    );
}

#[test]
fn test_list_no_repos() {
    let workspace = TestWorkspace::new();
    std::fs::create_dir(workspace.root_path().join("not-a-repo")).unwrap();

    let output = list(&workspace, &["git", "--list"]);

    insta::assert_snapshot!(output.trim_end(), @"No git repos found.");
}
