use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod request_repository;
pub mod stock_repository;
pub mod user_repository;

pub use request_repository::{NewRequestLine, RequestRepository, RequestWithItems};
pub use stock_repository::StockRepository;
pub use user_repository::UserRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
