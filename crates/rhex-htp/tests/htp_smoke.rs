//! End-to-end protocol smoke tests against the built binary.

use assert_cmd::Command;

fn run(script: &str) -> String {
    let assert = Command::cargo_bin("rhex-htp")
        .unwrap()
        .args(["--size", "5"])
        .write_stdin(script.to_string())
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_identity_commands() {
    let out = run("name\nversion\nprotocol_version\nquit\n");
    assert!(out.contains("= rhex"));
    assert!(out.contains("= 2"));
}

#[test]
fn test_command_id_echoed() {
    let out = run("7 name\nquit\n");
    assert!(out.contains("=7 rhex"));
}

#[test]
fn test_param_set_then_list() {
    let out = run("param_player max_depth 3\nparam_player\nquit\n");
    assert!(out.contains("[string] max_depth 3"));
}

#[test]
fn test_unknown_command_fails_cleanly() {
    let out = run("warp 9\nname\nquit\n");
    assert!(out.contains("? unknown command: warp"));
    // The failure does not poison the session.
    assert!(out.contains("= rhex"));
}

#[test]
fn test_genmove_produces_a_move() {
    let out = run(
        "boardsize 4\nparam_player max_depth 2\nparam_player max_time 1\ngenmove black\nquit\n",
    );
    assert!(!out.contains('?'), "unexpected failure in:\n{out}");
    // One of the responses is a cell like c2.
    let played = out
        .lines()
        .filter_map(|l| l.strip_prefix("= "))
        .any(|r| {
            let r = r.trim();
            !r.is_empty()
                && r.len() <= 3
                && r.as_bytes()[0].is_ascii_lowercase()
                && r[1..].chars().all(|c| c.is_ascii_digit())
        });
    assert!(played, "no move in:\n{out}");
}

#[test]
fn test_no_table_diagnostics_fail() {
    let out = run("param_player tt_bits 0\nplayer-scores\nquit\n");
    assert!(out.contains("? No hashtable!"));
}
