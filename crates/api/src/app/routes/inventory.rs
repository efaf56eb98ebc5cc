use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use stocksense_inventory::{InventoryPatch, InventoryRecord, NewInventoryRecord};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/low-stock/list", get(list_low_stock))
        .route("/:id", put(update_item).delete(delete_item))
}

/// Newest first.
pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<InventoryRecord>> {
    let mut records = services.repository.list_all();
    // Reverse first so records created in the same instant are still newest first.
    records.reverse();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(records)
}

pub async fn list_low_stock(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<InventoryRecord>> {
    Json(services.repository.find_below_reorder_level())
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    payload: Result<Json<NewInventoryRecord>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.repository.create(body) {
        Ok(record) => {
            tracing::info!(principal = %principal.principal_id(), id = %record.id, sku = %record.sku, "inventory item created");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    payload: Result<Json<InventoryPatch>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(patch) = match payload {
        Ok(p) => p,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.repository.update(id, patch) {
        Ok(record) => {
            tracing::info!(principal = %principal.principal_id(), id = %record.id, "inventory item updated");
            Json(record).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.repository.delete(id) {
        Ok(record) => {
            tracing::info!(principal = %principal.principal_id(), id = %record.id, "inventory item deleted");
            Json(dto::MessageResponse { message: "Item deleted" }).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
