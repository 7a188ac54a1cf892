mod common;
use common::*;
use gotope::mach::Val;

#[test]
fn test_hello() {
    assert_eq!(exec(r#""hello" | out"#, "out"), "hello");
}

#[test]
fn test_values_in_tape_order() {
    let s = r#"
        "product:" | out
        x: 2 y: 3 z: *(x, y)
        z | out
    "#;
    assert_eq!(exec(s, "out"), "product:\n6");
}

#[test]
fn test_empty_string() {
    assert_eq!(exec(r#""" | out 1 | out"#, "out"), "\n1");
}

#[test]
fn test_escapes() {
    assert_eq!(exec(r#""a\tb\\\"" | out"#, "out"), "a\tb\\\"");
}

#[test]
fn test_named_streams() {
    let s = r#"
        "to log" | log
        "to out" | out
        2.5 | log
    "#;
    assert_eq!(exec(s, "log"), "to log\n2.5");
    assert_eq!(exec(s, "out"), "to out");
    assert_eq!(exec(s, "err"), "");
}

#[test]
fn test_backtick_prints_to_out() {
    assert_eq!(exec("s: \"hi\" `s `4", "out"), "hi\n4");
}

#[test]
fn test_labeled_string_renders_as_text() {
    let config = serial();
    let mut p = assemble(r#"greeting: "hey" n: 3 greeting | out n | out"#);
    let (_, snapshots) = run(&mut p, &config);
    let out = p.streams().id("out").unwrap();
    assert_eq!(
        snapshots[0].stream(out),
        &[Val::Text("hey".to_string()), Val::Number(3.0)]
    );
}

#[test]
fn test_snapshots_follow_values() {
    let config = serial().with_budget(4).with_cadence(1);
    let mut p = assemble("x: 1 neg: -1 flip: *(x, neg) x = flip x | out");
    let (_, snapshots) = run(&mut p, &config);
    let texts: Vec<String> = snapshots.iter().map(|s| s.text(0)).collect();
    assert_eq!(texts, vec!["-1", "1", "-1", "1"]);
}
