#![expect(clippy::unwrap_used, reason = "tests unwrap filesystem setup")]

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::NativeHost;
use mimo_eval::Host;

fn path_in(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

#[test]
fn files_round_trip() {
    let dir = TempDir::new().unwrap();
    let host = NativeHost::default();
    let file = path_in(&dir, "note.txt");

    assert!(!host.exists(&file));
    host.write_file(&file, "hi").unwrap();
    assert!(host.exists(&file));
    assert_eq!(host.read_file(&file).unwrap(), "hi");
    host.remove_file(&file).unwrap();
    assert!(!host.exists(&file));
    assert!(host.read_file(&file).is_err());
}

#[test]
fn directories() {
    let dir = TempDir::new().unwrap();
    let host = NativeHost::default();
    let nested = path_in(&dir, "a/b");

    assert!(host.make_dir(&nested, false).is_err());
    host.make_dir(&nested, true).unwrap();
    host.write_file(&path_in(&dir, "z.txt"), "").unwrap();
    assert_eq!(
        host.list_dir(&dir.path().to_string_lossy()).unwrap(),
        vec!["a".to_string(), "z.txt".to_string()]
    );

    let top = path_in(&dir, "a");
    assert!(host.remove_dir(&top, false).is_err());
    host.remove_dir(&top, true).unwrap();
    assert!(!host.exists(&top));
}

#[test]
fn arguments_are_passed_through() {
    let host = NativeHost::new(vec!["x".to_string(), "y".to_string()]);
    assert_eq!(host.arguments(), vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn cwd_is_absolute() {
    let host = NativeHost::default();
    assert!(host.is_absolute(&host.cwd()));
    assert_eq!(host.resolve_path(&["/tmp", "a", "..", "b"]), "/tmp/b");
}

#[test]
fn unreachable_url_is_an_http_error() {
    let host = NativeHost::default();
    let request = mimo_eval::HttpRequest {
        method: "GET".to_string(),
        url: "http://127.0.0.1:1/".to_string(),
        headers: Vec::new(),
        body: None,
    };
    assert!(matches!(
        host.fetch(&request),
        Err(mimo_eval::HostError::Http(_))
    ));
}
