//! API REST del servicio de precios
//!
//! Rutas axum sobre el PriceStore: escritura validada con códigos de
//! error estables, y lecturas por price_id o por vehicle_id. El
//! endpoint de búsqueda por vehículo es el que consume el inventario.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::pricing::error::{translate, PriceWriteError};
use crate::pricing::model::{Price, PricePayload};
use crate::pricing::store::PriceStore;

/// Parámetros de búsqueda por vehículo
#[derive(Debug, Deserialize)]
pub struct VehicleIdQuery {
    pub vehicle_id: i64,
}

/// Cuerpo de error con los códigos traducidos
#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<ErrorCode>,
}

#[derive(Debug, Serialize)]
struct ErrorCode {
    code: &'static str,
}

pub fn create_pricing_router(store: PriceStore) -> Router {
    Router::new()
        .route("/prices", post(create_price))
        .route("/prices/search", get(search_by_vehicle))
        .route(
            "/prices/:id",
            get(get_price).patch(patch_price).delete(delete_price),
        )
        .with_state(store)
}

/// POST /prices
async fn create_price(
    State(store): State<PriceStore>,
    Json(payload): Json<PricePayload>,
) -> Response {
    match write_price(&store, payload).await {
        Ok(price) => {
            log::info!(
                "💾 Price {} stored for vehicle {}",
                price.price_id,
                price.vehicle_id
            );
            (StatusCode::CREATED, Json(price)).into_response()
        }
        Err(e) => translated_response(&e),
    }
}

async fn write_price(store: &PriceStore, payload: PricePayload) -> Result<Price, PriceWriteError> {
    let valid = payload.validate().map_err(PriceWriteError::Invalid)?;
    store.create(valid).await
}

/// GET /prices/:id
async fn get_price(State(store): State<PriceStore>, Path(id): Path<i64>) -> Response {
    match store.find(id).await {
        Some(price) => Json(price).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /prices/search?vehicle_id=N
async fn search_by_vehicle(
    State(store): State<PriceStore>,
    Query(query): Query<VehicleIdQuery>,
) -> Response {
    match store.find_by_vehicle_id(query.vehicle_id).await {
        Some(price) => Json(price).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// PATCH /prices/:id - los campos ausentes conservan su valor actual
async fn patch_price(
    State(store): State<PriceStore>,
    Path(id): Path<i64>,
    Json(payload): Json<PricePayload>,
) -> Response {
    let existing = match store.find(id).await {
        Some(price) => price,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    match apply_patch(&store, id, payload.merged_with(&existing)).await {
        Ok(Some(price)) => Json(price).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => translated_response(&e),
    }
}

async fn apply_patch(
    store: &PriceStore,
    price_id: i64,
    merged: PricePayload,
) -> Result<Option<Price>, PriceWriteError> {
    let valid = merged.validate().map_err(PriceWriteError::Invalid)?;
    store.update(price_id, valid).await
}

/// DELETE /prices/:id
async fn delete_price(State(store): State<PriceStore>, Path(id): Path<i64>) -> StatusCode {
    if store.delete(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

fn translated_response(err: &PriceWriteError) -> Response {
    let translated = translate(err);
    let body = ErrorBody {
        errors: translated
            .codes
            .into_iter()
            .map(|code| ErrorCode { code })
            .collect(),
    };
    (translated.status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn post_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_price_returns_201_with_assigned_id() {
        let router = create_pricing_router(PriceStore::new());

        let response = router
            .oneshot(post_request(
                "/prices",
                r#"{"currency":"USD","price":"12000.00","vehicle_id":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["price_id"], 1);
        assert_eq!(body["currency"], "USD");
        assert_eq!(body["price"], "12000.00");
        assert_eq!(body["vehicle_id"], 1);
    }

    #[tokio::test]
    async fn test_invalid_currency_reports_code() {
        let router = create_pricing_router(PriceStore::new());

        let response = router
            .oneshot(post_request(
                "/prices",
                r#"{"currency":"ABC","price":"12000.00","vehicle_id":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["code"], "currency.code.invalid");
    }

    #[tokio::test]
    async fn test_empty_payload_reports_all_required_codes() {
        let router = create_pricing_router(PriceStore::new());

        let response = router.oneshot(post_request("/prices", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["code"], "currency.code.required");
        assert_eq!(body["errors"][1]["code"], "price.required");
        assert_eq!(body["errors"][2]["code"], "vehicle_id.required");
    }

    #[tokio::test]
    async fn test_duplicate_vehicle_id_reports_not_unique() {
        let router = create_pricing_router(PriceStore::new());

        let first = router
            .clone()
            .oneshot(post_request(
                "/prices",
                r#"{"currency":"USD","price":"12000.00","vehicle_id":1}"#,
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = router
            .oneshot(post_request(
                "/prices",
                r#"{"currency":"USD","price":"8000.00","vehicle_id":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body = body_json(second).await;
        assert_eq!(body["errors"][0]["code"], "vehicle_id.not.unique");
    }

    #[tokio::test]
    async fn test_get_missing_price_is_404() {
        let router = create_pricing_router(PriceStore::new());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/prices/99")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
