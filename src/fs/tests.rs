use std::collections::HashMap;

use crate::ArcPath;

use super::Fs;

#[tokio::test]
async fn test_fs_write_then_read() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("roundtrip.toml");
    let path = ArcPath::from(file_path.as_path());

    let fs = Fs::spawn();

    fs.write_all(path.clone(), "key = 1\n".to_string())
        .await
        .unwrap();
    let contents = fs.read_to_string(path.clone()).await.unwrap();
    assert_eq!(contents, "key = 1\n");

    fs.remove_file(path.clone()).await.unwrap();
    assert!(fs.read_to_string(path).await.is_err());
    temp_dir.close().unwrap();
}

#[tokio::test]
async fn test_fs_mkdir_and_read_dir() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir_path = temp_dir.path().join("nested").join("logs");
    let dir = ArcPath::from(dir_path.as_path());

    let fs = Fs::spawn();

    fs.mkdir(dir.clone()).await.unwrap();
    assert!(fs.read_dir(dir.clone()).await.unwrap().is_empty());

    let file = ArcPath::from(dir_path.join("a.log").as_path());
    fs.write_all(file.clone(), String::new()).await.unwrap();
    let entries = fs.read_dir(dir).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], file);

    temp_dir.close().unwrap();
}

#[tokio::test]
async fn test_fs_open_file_caches_handles() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("cached.log");
    let path = ArcPath::from(file_path.as_path());

    let fs = Fs::spawn();

    let first = fs.open_file(path.clone()).await.unwrap();
    let second = fs.open_file(path.clone()).await.unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    fs.modified(path).await.unwrap();
    temp_dir.close().unwrap();
}

#[tokio::test]
async fn test_fs_mock() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(std::path::Path::new("/mock/config.toml"));

    assert!(fs.read_to_string(path.clone()).await.is_err());
    fs.write_all(path.clone(), "x = true".to_string())
        .await
        .unwrap();
    assert_eq!(fs.read_to_string(path.clone()).await.unwrap(), "x = true");

    let dir = ArcPath::from(std::path::Path::new("/mock"));
    let entries = fs.read_dir(dir).await.unwrap();
    assert_eq!(entries, vec![path.clone()]);

    assert!(fs.open_file(path.clone()).await.is_ok());
    fs.remove_file(path.clone()).await.unwrap();
    assert!(fs.remove_file(path).await.is_err());
}
