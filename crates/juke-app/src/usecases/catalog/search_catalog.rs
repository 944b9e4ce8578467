use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use juke_core::catalog::{CatalogKind, CatalogResults};
use juke_core::ports::{CatalogGatewayPort, CredentialStorePort};
use juke_core::GatewayError;

use crate::usecases::internal::require_credential;

/// Search artists, albums or tracks.
pub struct SearchCatalog {
    store: Arc<dyn CredentialStorePort>,
    catalog: Arc<dyn CatalogGatewayPort>,
}

impl SearchCatalog {
    pub fn new(store: Arc<dyn CredentialStorePort>, catalog: Arc<dyn CatalogGatewayPort>) -> Self {
        Self { store, catalog }
    }

    pub fn from_ports(
        store: Arc<dyn CredentialStorePort>,
        catalog: Arc<dyn CatalogGatewayPort>,
    ) -> Self {
        Self::new(store, catalog)
    }

    pub async fn execute(
        &self,
        kind: CatalogKind,
        query: &str,
    ) -> Result<CatalogResults, GatewayError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(empty(kind));
        }

        async {
            let credential = require_credential(self.store.as_ref()).await?;
            let token = credential.token.as_str();
            let results = match kind {
                CatalogKind::Artists => {
                    CatalogResults::Artists(self.catalog.search_artists(token, query).await?)
                }
                CatalogKind::Albums => {
                    CatalogResults::Albums(self.catalog.search_albums(token, query).await?)
                }
                CatalogKind::Tracks => {
                    CatalogResults::Tracks(self.catalog.search_tracks(token, query).await?)
                }
            };
            debug!(count = results.len(), "Catalog search finished");
            Ok(results)
        }
        .instrument(info_span!("usecase.search_catalog.execute", %kind, query = %query))
        .await
    }
}

fn empty(kind: CatalogKind) -> CatalogResults {
    match kind {
        CatalogKind::Artists => CatalogResults::Artists(Vec::new()),
        CatalogKind::Albums => CatalogResults::Albums(Vec::new()),
        CatalogKind::Tracks => CatalogResults::Tracks(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockCatalog;
    use juke_core::catalog::Track;
    use juke_core::session::{Credential, PersistedSession};
    use juke_infra::InMemoryCredentialStore;

    fn store() -> Arc<InMemoryCredentialStore> {
        Arc::new(InMemoryCredentialStore::with_session(
            PersistedSession::signed_in(Credential::new("alice", "tok"), Some(String::new())),
        ))
    }

    #[tokio::test]
    async fn test_dispatches_on_kind() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_search_tracks()
            .withf(|token, query| token.to_string() == "tok" && query.to_string() == "so what")
            .times(1)
            .returning(|_, _| {
                Ok(vec![Track {
                    name: "So What".into(),
                    ..Default::default()
                }])
            });
        catalog.expect_search_artists().times(0);
        catalog.expect_search_albums().times(0);

        let use_case = SearchCatalog::new(store(), Arc::new(catalog));
        let results = use_case.execute(CatalogKind::Tracks, " so what ").await.unwrap();

        assert_eq!(results.kind(), CatalogKind::Tracks);
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_call() {
        let mut catalog = MockCatalog::new();
        catalog.expect_search_albums().times(0);

        let use_case = SearchCatalog::new(store(), Arc::new(catalog));
        let results = use_case.execute(CatalogKind::Albums, "  ").await.unwrap();

        assert!(results.is_empty());
        assert_eq!(results.kind(), CatalogKind::Albums);
    }

    #[tokio::test]
    async fn test_signed_out_search_fails() {
        let mut catalog = MockCatalog::new();
        catalog.expect_search_artists().times(0);

        let use_case = SearchCatalog::new(Arc::new(InMemoryCredentialStore::new()), Arc::new(catalog));

        assert!(matches!(
            use_case.execute(CatalogKind::Artists, "miles").await,
            Err(GatewayError::NotAuthenticated)
        ));
    }
}
