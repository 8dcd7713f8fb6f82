use super::{Log, LogLevel};

async fn settle() {
    // The mock records from a detached task; let it run.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_mock_records_messages() {
    let log = Log::mock();
    log.info("app", "starting");
    log.warn("link", "queue nearly full");
    log.error("link", "bridge gone");
    settle().await;

    let Log::Mock(mock) = &log else {
        panic!("expected mock");
    };
    let messages = mock.get_messages().await;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].level, LogLevel::Info);
    assert_eq!(messages[0].scope, "app");
    assert_eq!(messages[1].level, LogLevel::Warning);
    assert_eq!(messages[2].level, LogLevel::Error);
    assert_eq!(messages[2].message, "bridge gone");
}

#[tokio::test]
async fn test_mock_flush_completes() {
    let log = Log::mock();
    log.info("app", "bye");
    settle().await;
    log.flush().await.unwrap();
}

#[tokio::test]
async fn test_actor_logs_through_mock_fs() {
    let fs = crate::fs::Fs::mock(std::collections::HashMap::new());
    let dir = crate::ArcPath::from(std::path::Path::new("/mock/logs"));
    let log = Log::spawn(fs, LogLevel::Info, 0, dir).await.unwrap();
    log.info("app", "hello");
    settle().await;
    log.flush().await.unwrap();
}
