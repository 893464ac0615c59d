use super::*;
use pretty_assertions::assert_eq;

#[test]
fn line_of_is_one_based() {
    let src = "set a 1\nshow a\r\nend";
    assert_eq!(line_of(src, 1), Some("set a 1"));
    assert_eq!(line_of(src, 2), Some("show a"));
    assert_eq!(line_of(src, 3), Some("end"));
    assert_eq!(line_of(src, 4), None);
    assert_eq!(line_of(src, 0), None);
}

#[test]
fn source_map_lookup() {
    let mut map = SourceMap::new();
    map.add(Arc::from("lib.mimo"), Arc::from("export set x 1\n"));
    assert_eq!(map.line("lib.mimo", 1), Some("export set x 1"));
    assert_eq!(map.line("other.mimo", 1), None);
}
