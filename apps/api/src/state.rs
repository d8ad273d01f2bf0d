use sea_orm::DatabaseConnection;

/// Shared application state: the connection pool handed to each domain's
/// repositories.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
