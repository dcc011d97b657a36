//! Endpoints REST del inventario de vehículos
//!
//! CRUD sobre /cars delegando en el VehicleService. La validación del
//! payload corre aquí; la integridad (fabricante, coordenadas) la
//! resuelve el servicio.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use validator::Validate;

use crate::models::{Vehicle, VehiclePayload};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicles_router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_vehicles).post(create_vehicle))
        .route(
            "/cars/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

/// GET /cars - inventario completo, enriquecido
pub async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.service.list().await?;
    Ok(Json(vehicles))
}

/// GET /cars/:id
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.service.find_by_id(id).await?;
    Ok(Json(vehicle))
}

/// POST /cars - 201 con header Location apuntando al recurso nuevo
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(payload): Json<VehiclePayload>,
) -> AppResult<Response> {
    payload.validate()?;
    log::info!("🚗 Creating vehicle: {}", payload.details.model);

    let saved = state.service.save(payload.into_vehicle(None)).await?;
    let resource = saved
        .id
        .map(|id| format!("/cars/{}", id))
        .unwrap_or_else(|| "/cars".to_string());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, resource)],
        Json(saved),
    )
        .into_response())
}

/// PUT /cars/:id - solo details y location del payload se aplican
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<VehiclePayload>,
) -> AppResult<Json<Vehicle>> {
    payload.validate()?;
    log::info!("🚗 Updating vehicle {}", id);

    let updated = state.service.save(payload.into_vehicle(Some(id))).await?;
    Ok(Json(updated))
}

/// DELETE /cars/:id - 204 si existía
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_api_router;
    use crate::clients::{MapsClient, PriceClient, PRICE_UNAVAILABLE};
    use crate::config::EnvironmentConfig;
    use crate::discovery::{EndpointResolver, EndpointTarget, HttpDiscoveryClient};
    use crate::models::seed_manufacturers;
    use crate::repositories::{InMemoryManufacturerStore, InMemoryVehicleStore, ManufacturerStore};
    use crate::services::VehicleService;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const VEHICLE_BODY: &str = r#"{
        "condition": "USED",
        "details": {
            "body": "sedan",
            "model": "Impala",
            "manufacturer": {"code": 101, "name": "Chevrolet"},
            "number_of_doors": 4,
            "fuel_type": "Gasoline",
            "engine": "3.6L V6",
            "mileage": 32280,
            "model_year": 2018,
            "production_year": 2018,
            "external_color": "white"
        },
        "location": {"lat": 40.730610, "lon": -73.935242}
    }"#;

    async fn test_router() -> Router {
        let manufacturers = InMemoryManufacturerStore::new();
        for manufacturer in seed_manufacturers() {
            manufacturers.save(manufacturer).await.unwrap();
        }

        let discovery = Arc::new(HttpDiscoveryClient::new(
            "http://127.0.0.1:1".to_string(),
            200,
        ));
        let resolver = EndpointResolver::new(discovery);
        let price_client = PriceClient::new(
            resolver.clone(),
            EndpointTarget::new("pricing-service", false, "http://127.0.0.1:1"),
            200,
        );
        let maps_client = MapsClient::new(
            resolver,
            EndpointTarget::new("maps", false, "http://127.0.0.1:1"),
            200,
        );

        let service = VehicleService::new(
            Arc::new(InMemoryVehicleStore::new()),
            Arc::new(manufacturers),
            price_client,
            maps_client,
            false,
        );

        create_api_router().with_state(AppState::new(service, EnvironmentConfig::default()))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
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
    async fn test_health_check() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let router = test_router().await;

        let response = router
            .oneshot(Request::builder().uri("/cars").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_returns_201_with_location_header() {
        let router = test_router().await;

        let response = router
            .oneshot(json_request("POST", "/cars", VEHICLE_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/cars/1")
        );

        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["price"], PRICE_UNAVAILABLE);
        assert_eq!(body["details"]["manufacturer"]["name"], "Chevrolet");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_model() {
        let router = test_router().await;
        let body = VEHICLE_BODY.replace("\"Impala\"", "\"\"");

        let response = router
            .oneshot(json_request("POST", "/cars", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_unknown_vehicle_is_404() {
        let router = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/cars/99")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_then_delete_flow() {
        let router = test_router().await;

        let created = router
            .clone()
            .oneshot(json_request("POST", "/cars", VEHICLE_BODY))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let updated_body = VEHICLE_BODY.replace("\"Impala\"", "\"Malibu\"");
        let updated = router
            .clone()
            .oneshot(json_request("PUT", "/cars/1", &updated_body))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let body = body_json(updated).await;
        assert_eq!(body["details"]["model"], "Malibu");

        let deleted = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/cars/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = router
            .oneshot(
                Request::builder()
                    .uri("/cars/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
