use mindmitra_backend::message::ChatTurn;
use mindmitra_backend::services::prompt::HISTORY_WINDOW;
use mindmitra_backend::services::session_manager::SessionManager;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn basic_session_flow() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    assert!(!sid.is_empty());
    let len = mgr
        .append_turns(&sid, [ChatTurn::user("hello"), ChatTurn::bot("hi there")])
        .await;
    assert_eq!(len, 2);
    let history = mgr.get_history(&sid).await.unwrap();
    assert_eq!(history[1], ChatTurn::bot("hi there"));
    assert!(mgr.remove_session(&sid).await);
    assert!(mgr.is_empty().await);
}

#[tokio::test]
async fn test_ensure_session_keeps_existing_history() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    mgr.append_turns("client-id", [ChatTurn::user("first")]).await;
    assert_eq!(mgr.ensure_session("client-id").await, "client-id");
    assert_eq!(mgr.get_history("client-id").await.unwrap().len(), 1);
    assert_eq!(mgr.len().await, 1);
}

#[tokio::test]
async fn test_history_is_capped_to_prompt_window() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;

    let mut len = 0;
    for i in 0..200 {
        len = mgr
            .append_turns(&sid, [ChatTurn::user(format!("u{i}")), ChatTurn::bot(format!("b{i}"))])
            .await;
    }

    assert_eq!(len, HISTORY_WINDOW);
    let history = mgr.get_history(&sid).await.unwrap();
    assert_eq!(history.len(), HISTORY_WINDOW);
    assert_eq!(history[0], ChatTurn::user("u195"));
    assert_eq!(history[HISTORY_WINDOW - 1], ChatTurn::bot("b199"));
}

#[tokio::test]
async fn test_session_expiration() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;

    // Wait for expiration
    sleep(Duration::from_millis(20)).await;

    let removed_count = mgr.purge_expired().await;
    assert_eq!(removed_count, 1, "Should have removed 1 expired session");
    assert!(
        !mgr.remove_session(&sid).await,
        "Session should already be gone"
    );
}
