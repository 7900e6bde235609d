use crate::services::catalog::catalog_service::CatalogService;
use crate::services::catalog::stop_registry::StopRegistry;
use crate::services::replica::replica_client::ReplicaClient;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub stops: StopRegistry,
    pub replica: Option<ReplicaClient>,
}
