use thiserror::Error;

use crate::domain::delivery::DeliveryId;
use crate::domain::inventory::{Sku, StoreId};
use crate::store::StoreError;

/// Machine-readable classification of a service failure. Everything except
/// `Storage` carries a message meant to be relayed to the chat user
/// verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Empty,
    Storage,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Store {0} not found.")]
    StoreNotFound(StoreId),
    #[error("SKU {sku} not found in store {store_id}.")]
    SkuNotFound { store_id: StoreId, sku: Sku },
    #[error("Delivery {0} not found.")]
    DeliveryNotFound(DeliveryId),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Empty(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StoreNotFound(_) | Self::SkuNotFound { .. } | Self::DeliveryNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Validation(_) => ErrorKind::Validation,
            Self::Empty(_) => ErrorKind::Empty,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn is_user_relayable(&self) -> bool {
        self.kind() != ErrorKind::Storage
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        Self::Storage(error.to_string())
    }
}
