#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use httpmock::prelude::*;
    use std::sync::Arc;

    use crate::tests::common::{token_body, REVOCATION_PATH, TOKEN_PATH};
    use crate::{MeshyError, ReqwestTransport, TokenService, TokenStore};

    fn service(server: &MockServer) -> (TokenService<ReqwestTransport>, TokenStore) {
        crate::tests::common::init_logging();
        let store = TokenStore::new();
        let service = TokenService::new(
            Arc::new(ReqwestTransport::default()),
            &format!("{}/auth/tester", server.base_url()),
            "pub-key",
            Some("tester"),
            store.clone(),
        )
        .expect("token service");
        (service, store)
    }

    #[tokio::test]
    async fn unknown_id_reads_return_absent() {
        let server = MockServer::start_async().await;
        let (service, _) = service(&server);

        assert!(service.get_access_token("missing").await.unwrap().is_none());
        assert!(service.get_refresh_token("missing").await.is_none());
        assert!(service.get_refresh_token("  ").await.is_none());
    }

    #[tokio::test]
    async fn password_grant_populates_the_cache() {
        let server = MockServer::start_async().await;
        let (service, store) = service(&server);

        let grant = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_includes("grant_type=password")
                    .body_includes("client_id=pub-key")
                    .body_includes("username=alice");
                then.status(200).json_body(token_body("tok-1", "ref-1", 500));
            })
            .await;

        let before = Utc::now();
        let id = service
            .acquire_with_password("alice", "wonderland", None)
            .await
            .unwrap();
        assert!(!id.is_empty());

        let entry = store.get(&id).await.expect("cached entry");
        assert_eq!(entry.access_token, "tok-1");
        assert!(entry.expires_at >= before + Duration::seconds(495));
        assert!(entry.expires_at <= Utc::now() + Duration::seconds(505));

        // Two reads inside the lifetime must not hit the network again.
        assert_eq!(
            service.get_access_token(&id).await.unwrap().as_deref(),
            Some("tok-1")
        );
        assert_eq!(
            service.get_access_token(&id).await.unwrap().as_deref(),
            Some("tok-1")
        );
        assert_eq!(
            service.get_refresh_token(&id).await.as_deref(),
            Some("ref-1")
        );
        grant.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn caller_supplied_authentication_id_is_kept() {
        let server = MockServer::start_async().await;
        let (service, store) = service(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(token_body("tok-1", "ref-1", 3600));
            })
            .await;

        let id = service
            .acquire_with_password("alice", "wonderland", Some("my-session"))
            .await
            .unwrap();
        assert_eq!(id, "my-session");
        assert!(store.get("my-session").await.is_some());
    }

    #[tokio::test]
    async fn expired_entry_triggers_exactly_one_refresh() {
        let server = MockServer::start_async().await;
        let (service, _) = service(&server);

        let password_grant = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .body_includes("grant_type=password");
                then.status(200).json_body(token_body("stale", "ref-1", -1));
            })
            .await;
        let refresh_grant = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .body_includes("grant_type=refresh_token")
                    .body_includes("refresh_token=ref-1");
                then.status(200).json_body(token_body("fresh", "ref-2", 3600));
            })
            .await;

        let id = service
            .acquire_with_password("alice", "wonderland", None)
            .await
            .unwrap();

        // The immediately-expired entry refreshes on first read: two grant
        // calls total for acquire plus one read.
        let token = service.get_access_token(&id).await.unwrap();
        assert_eq!(token.as_deref(), Some("fresh"));
        password_grant.assert_hits_async(1).await;
        refresh_grant.assert_hits_async(1).await;

        // Entry was replaced wholesale under the same id.
        assert_eq!(
            service.get_refresh_token(&id).await.as_deref(),
            Some("ref-2")
        );

        // The refreshed token is valid; no further grant calls.
        let token = service.get_access_token(&id).await.unwrap();
        assert_eq!(token.as_deref(), Some("fresh"));
        refresh_grant.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn failed_refresh_propagates_and_keeps_stale_entry() {
        let server = MockServer::start_async().await;
        let (service, store) = service(&server);

        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .body_includes("grant_type=password");
                then.status(200).json_body(token_body("stale", "ref-1", -1));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .body_includes("grant_type=refresh_token");
                then.status(500).body("boom");
            })
            .await;

        let id = service
            .acquire_with_password("alice", "wonderland", None)
            .await
            .unwrap();

        let err = service.get_access_token(&id).await.unwrap_err();
        assert!(matches!(err, MeshyError::Api { status, .. } if status.as_u16() == 500));

        // No partial mutation on failure.
        let entry = store.get(&id).await.expect("stale entry kept");
        assert_eq!(entry.access_token, "stale");
        assert_eq!(entry.refresh_token.as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn expired_entry_without_refresh_token_is_an_error() {
        let server = MockServer::start_async().await;
        let (service, _) = service(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200)
                    .json_body(serde_json::json!({"access_token": "stale", "expires_in": -1}));
            })
            .await;

        let id = service
            .acquire_with_password("alice", "wonderland", None)
            .await
            .unwrap();
        let err = service.get_access_token(&id).await.unwrap_err();
        assert!(matches!(err, MeshyError::MissingRefreshToken(ref bad) if bad == &id));
    }

    #[tokio::test]
    async fn sign_out_revokes_then_clears_the_entry() {
        let server = MockServer::start_async().await;
        let (service, _) = service(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(token_body("tok-1", "ref-1", 3600));
            })
            .await;
        let revocation = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(REVOCATION_PATH)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_includes("token=ref-1")
                    .body_includes("token_type_hint=refresh_token")
                    .body_includes("client_id=pub-key");
                then.status(200);
            })
            .await;

        let id = service
            .acquire_with_password("alice", "wonderland", None)
            .await
            .unwrap();

        service.sign_out(&id).await.unwrap();
        revocation.assert_hits_async(1).await;
        assert!(service.get_access_token(&id).await.unwrap().is_none());
        assert!(service.get_refresh_token(&id).await.is_none());

        // Second sign-out is a no-op, no extra revocation call.
        service.sign_out(&id).await.unwrap();
        revocation.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn sign_out_clears_the_entry_even_when_revocation_fails() {
        let server = MockServer::start_async().await;
        let (service, store) = service(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(token_body("tok-1", "ref-1", 3600));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(REVOCATION_PATH);
                then.status(500).body("revocation down");
            })
            .await;

        let id = service
            .acquire_with_password("alice", "wonderland", None)
            .await
            .unwrap();

        service.sign_out(&id).await.unwrap();
        assert!(store.get(&id).await.is_none());
    }
}
