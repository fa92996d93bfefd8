//! # Persistence Flows
//!
//! File-backed storage survives a node restart, and the key layouts behave
//! as documented once data is on disk.

#[cfg(test)]
mod tests {
    use super::super::{authorized, json_body, TOKEN};
    use axum::http::{Method, StatusCode};
    use ledger_node::{LedgerNode, NodeConfig, StorageBackend, StorageConfig};
    use ol_01_domain_ledger::{
        shared_store, DomainKey, DomainLedgerApi, FileBackedKVStore, KeyLayout, LedgerError,
        LedgerRegistry, SystemTimeSource,
    };
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn file_node(path: &Path, layout: KeyLayout) -> LedgerNode {
        let mut config = NodeConfig {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_path: path.to_path_buf(),
                key_layout: layout,
            },
            ..NodeConfig::default()
        };
        config.router.auth.api_token = Some(TOKEN.to_string());
        LedgerNode::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_offers_and_counts_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.bin");

        {
            let app = file_node(&path, KeyLayout::Separate).router().router();
            for email in ["1@b.com", "2@b.com"] {
                let body = format!(r#"{{"email":"{}","amount":7}}"#, email);
                let resp = app
                    .clone()
                    .oneshot(authorized(Method::POST, "/?domain=example.com", &body))
                    .await
                    .unwrap();
                assert_eq!(resp.status(), StatusCode::OK);
            }
            let resp = app
                .oneshot(authorized(Method::POST, "/requests?domain=example.com", ""))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let node = file_node(&path, KeyLayout::Separate);
        assert_eq!(node.registry().known_domains().unwrap(), vec!["example.com"]);

        let app = node.router().router();
        let resp = app
            .clone()
            .oneshot(authorized(Method::GET, "/?domain=example.com", ""))
            .await
            .unwrap();
        let listed = json_body(resp).await;
        assert_eq!(listed["offers"][0]["email"], "1@b.com");
        assert_eq!(listed["offers"][1]["email"], "2@b.com");

        let resp = app
            .oneshot(authorized(Method::GET, "/requests?domain=example.com", ""))
            .await
            .unwrap();
        assert_eq!(json_body(resp).await["count"], 1);
    }

    #[test]
    fn test_shared_layout_collides_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.bin");
        let key = DomainKey::parse("example.com").unwrap();

        {
            let store = shared_store(FileBackedKVStore::open(&path).unwrap());
            let registry = LedgerRegistry::new(store, Arc::new(SystemTimeSource), KeyLayout::Shared);
            registry.ledger(&key).lock().track_request().unwrap();
        }

        let store = shared_store(FileBackedKVStore::open(&path).unwrap());
        let registry = LedgerRegistry::new(store, Arc::new(SystemTimeSource), KeyLayout::Shared);
        let ledger = registry.ledger(&key);
        let ledger = ledger.lock();

        assert_eq!(ledger.request_count().unwrap(), 1);
        let err = ledger.list_offers().unwrap_err();
        assert!(matches!(err, LedgerError::Corrupted { .. }));
    }

    #[test]
    fn test_separate_layout_keeps_counter_apart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.bin");
        let node = file_node(&path, KeyLayout::Separate);
        let key = DomainKey::parse("example.com").unwrap();

        let handle = node.registry().ledger(&key);
        let mut ledger = handle.lock();
        ledger.track_request().unwrap();
        assert!(ledger.list_offers().unwrap().is_empty());
        assert_eq!(ledger.request_count().unwrap(), 1);
    }
}
