use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::RestError;

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(db: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Borrow the shared connection for one request.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, RestError> {
        self.db
            .lock()
            .map_err(|_| RestError::Internal("database lock poisoned".to_string()))
    }
}
