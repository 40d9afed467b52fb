use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    catalog::CatalogRepositoryImpl, health::HealthCheckRepositoryImpl, memory::InMemoryStore,
    reservation::ReservationRepositoryImpl,
};
use kernel::repository::{
    catalog::CatalogRepository, health::HealthCheckRepository, reservation::ReservationRepository,
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    catalog_repository: Arc<dyn CatalogRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let catalog_repository = Arc::new(CatalogRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            catalog_repository,
            reservation_repository,
        }
    }

    // すべてのリポジトリが同じプロセス内ストアを共有する
    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            health_check_repository: store.clone(),
            catalog_repository: store.clone(),
            reservation_repository: store,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn catalog_repository(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }
}
