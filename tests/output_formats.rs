//! Snapshot tests for the text and TOML renderings

use springbox::layout::{format_tree, to_toml};
use springbox::layout_source;

#[test]
fn test_text_tree() {
    let result = layout_source(
        r#"
        row main [width: 100, justify: center] {
            strut [width: 20, height: 10]
            spring
            box a [width: 30, height: 20, min_width: 10]
            col side [justify: right] {
                box b [width: 5, height: 5]
                box c [width: 12, height: 4]
            }
        }
    "#,
    )
    .expect("Should lay out");

    insta::assert_snapshot!(format_tree(&result), @r"
    row main x=0 y=0 w=100 h=20 justify=center
      strut x=0 y=5 w=20 h=10
      spring x=20 y=10 w=38 h=0
      box a x=58 y=0 w=30 h=20
      col side x=88 y=5.5 w=12 h=9 justify=right
        box b x=95 y=5.5 w=5 h=5
        box c x=88 y=10.5 w=12 h=4
    ");
}

#[test]
fn test_text_tree_multiple_roots() {
    let result = layout_source("box a [width: 3, height: 4] col { strut [height: 2] }")
        .expect("Should lay out");

    insta::assert_snapshot!(format_tree(&result), @r"
    box a x=0 y=0 w=3 h=4
    col x=0 y=14 w=0 h=2
      strut x=0 y=14 w=0 h=2
    ");
}

#[test]
fn test_toml_output() {
    let result = layout_source("row main [width: 10] { spring s box a [width: 4, height: 2] }")
        .expect("Should lay out");
    let toml = to_toml(&result).expect("Should serialize");

    let value: toml::Value = toml::from_str(&toml).expect("Should be valid TOML");
    let root = &value["root_elements"][0];
    assert_eq!(root["kind"].as_str(), Some("row"));
    assert_eq!(root["id"].as_str(), Some("main"));
    assert_eq!(root["justification"].as_str(), Some("start"));
    assert_eq!(root["bounds"]["width"].as_float(), Some(10.0));

    let spring = &root["children"][0];
    assert_eq!(spring["kind"].as_str(), Some("spring"));
    assert_eq!(spring["bounds"]["width"].as_float(), Some(6.0));
    assert_eq!(spring["width"]["max"].as_float(), Some(f64::INFINITY));
}
