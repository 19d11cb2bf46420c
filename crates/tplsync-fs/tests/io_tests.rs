use std::fs;
use tempfile::TempDir;
use tplsync_fs::{NormalizedPath, io};

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("templates.csv"));

    io::write_atomic(&path, b"a.txt,OwVT\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "a.txt,OwVT\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("templates.csv");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("templates.csv"));

    io::write_atomic(&path, b"content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(
        leftovers.is_empty(),
        "No temp files should remain, found: {:?}",
        leftovers.iter().map(|e| e.file_name()).collect::<Vec<_>>()
    );
}

#[test]
fn test_read_bytes_keeps_line_endings() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("a.txt");
    fs::write(&file_path, "line1\r\nline2\r\n").unwrap();

    let content = io::read_bytes(&NormalizedPath::new(&file_path), None).unwrap();
    assert_eq!(content, b"line1\r\nline2\r\n");
}

#[test]
fn test_read_bytes_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    assert!(io::read_bytes(&path, None).is_err());
}

#[test]
fn test_write_bytes_truncates() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("a.txt");
    fs::write(&file_path, "a much longer original").unwrap();

    io::write_bytes(&NormalizedPath::new(&file_path), b"short").unwrap();

    assert_eq!(fs::read(&file_path).unwrap(), b"short");
}

#[test]
fn test_remove_file_missing_is_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("gone.txt"));
    assert!(io::remove_file(&path).is_err());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn test_write_bytes_into_readonly_directory_fails() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let temp = TempDir::new().unwrap();
        let readonly = temp.path().join("readonly");
        fs::create_dir(&readonly).unwrap();
        fs::set_permissions(&readonly, Permissions::from_mode(0o555)).unwrap();

        let result = io::write_bytes(&NormalizedPath::new(readonly.join("a.txt")), b"x");

        let _ = fs::set_permissions(&readonly, Permissions::from_mode(0o755));
        assert!(result.is_err(), "Writing into a read-only directory should fail");
    }
}
