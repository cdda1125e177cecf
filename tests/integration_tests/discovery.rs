use crate::common::{TestWorkspace, dots, stdout_of};

#[test]
fn test_piped_records_replace_directory_scan() {
    let workspace = TestWorkspace::new();
    workspace.add_repo("api");
    workspace.add_repo("web");
    // Present on disk but not listed, so it must not appear
    workspace.add_repo("ignored");

    let web = workspace.root_path().join("web");
    let input = format!(
        "frontend\t{}\nbackend\tapi\nno tab here\nghost\tmissing\n",
        web.display()
    );
    let output = stdout_of(&workspace.lz_with_stdin(&["git", "--list"], &input));

    assert_eq!(
        output,
        format!(
            "── backend {} main 2d ∅\n── frontend {} main 2d ∅\n",
            dots(39),
            dots(38)
        )
    );
}

#[test]
fn test_empty_piped_input_finds_nothing() {
    let workspace = TestWorkspace::new();
    workspace.add_repo("api");

    let output = stdout_of(&workspace.lz_with_stdin(&["git", "--list"], ""));

    insta::assert_snapshot!(output.trim_end(), @"No git repos found.");
}

#[test]
fn test_scan_lists_children_in_name_order() {
    let workspace = TestWorkspace::new();
    workspace.add_repo("zeta");
    workspace.add_repo("alpha");
    std::fs::create_dir(workspace.root_path().join("plain")).unwrap();

    let output = stdout_of(&workspace.lz(&["git", "--list"]).output().unwrap());

    let names: Vec<_> = output
        .lines()
        .filter_map(|line| line.strip_prefix("── "))
        .filter_map(|rest| rest.split(' ').next())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}
