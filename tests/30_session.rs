mod common;

use std::sync::Arc;
use std::time::Duration;

use admin_console::authz::{fetch_session, PermissionEngine, SessionStore, SessionUser};
use admin_console::client::ApiClient;
use admin_console::models::MenuFilter;
use admin_console::services::MenuService;
use admin_console::sequence::RequestSequencer;
use anyhow::Result;

#[tokio::test]
async fn whoami_drives_permission_checks() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = server.client();

    let session = SessionStore::new();
    session.login(fetch_session(client.as_ref()).await?);
    let engine = PermissionEngine::new(session.clone());

    assert!(engine.has_permission("system:user:list"));
    assert!(engine.has_permission(["system:user:remove", "system:role:list"]));
    assert!(!engine.has_permission("system:user:add"));
    assert!(engine.has_permission(None::<&str>));

    // gate the fetched menu buttons by their perms key
    let menus = MenuService::new(client).list(&MenuFilter::default()).await?;
    let visible: Vec<_> =
        menus.iter().filter(|m| engine.permits_menu(m)).map(|m| m.menu_id).collect();
    assert_eq!(visible, vec![1, 2, 4, 5]);

    // promoting the session invalidates the cached decision inputs
    server.state.lock().unwrap().whoami = SessionUser {
        username: "root".into(),
        is_admin: true,
        permissions: vec![],
    };
    session.login(fetch_session(server.client().as_ref()).await?);
    assert!(engine.has_permission("system:user:add"));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() -> Result<()> {
    let url = common::unreachable_url()?;
    let client = Arc::new(ApiClient::new(&url, None, Duration::from_secs(2))?);
    let err = MenuService::new(client).list(&MenuFilter::default()).await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {:?}", err);
    Ok(())
}

#[tokio::test]
async fn overlapping_refreshes_keep_only_the_latest() -> Result<()> {
    let server = common::spawn_server().await?;
    let menus = MenuService::new(server.client());
    let sequencer = RequestSequencer::new();

    let stale = sequencer.latest("menus", async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        menus.list(&MenuFilter::default()).await
    });
    let fresh = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        sequencer.latest("menus", menus.list(&MenuFilter::default())).await
    };

    let (stale, fresh) = tokio::join!(stale, fresh);
    assert!(stale.is_none());
    assert_eq!(fresh.expect("latest response kept")?.len(), 5);
    Ok(())
}
