//! Stores PostgreSQL
//!
//! Implementación PostgreSQL de los stores usando SQLx con queries
//! en runtime. Los campos transitorios (price, address) no tienen
//! columna, por lo que nunca se persisten.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::FromRow;

use async_trait::async_trait;

use crate::models::{Condition, Details, Location, Manufacturer, Vehicle};
use crate::repositories::{ManufacturerStore, VehicleStore};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

/// Crea las tablas si no existen
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manufacturers (
            code INT PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            modified_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            condition TEXT NOT NULL,
            body TEXT NOT NULL,
            model TEXT NOT NULL,
            manufacturer_code INT NOT NULL REFERENCES manufacturers(code),
            number_of_doors INT,
            fuel_type TEXT,
            engine TEXT,
            mileage INT,
            model_year INT,
            production_year INT,
            external_color TEXT,
            lat DOUBLE PRECISION NOT NULL,
            lon DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Fila plana de la tabla vehicles con el nombre del fabricante unido
#[derive(Debug, FromRow)]
struct VehicleRow {
    id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    condition: String,
    body: String,
    model: String,
    manufacturer_code: i32,
    manufacturer_name: String,
    number_of_doors: Option<i32>,
    fuel_type: Option<String>,
    engine: Option<String>,
    mileage: Option<i32>,
    model_year: Option<i32>,
    production_year: Option<i32>,
    external_color: Option<String>,
    lat: f64,
    lon: f64,
}

impl VehicleRow {
    fn into_vehicle(self) -> AppResult<Vehicle> {
        let condition: Condition = self.condition.parse().map_err(AppError::Internal)?;

        Ok(Vehicle {
            id: Some(self.id),
            created_at: Some(self.created_at),
            modified_at: Some(self.modified_at),
            condition,
            details: Details {
                body: self.body,
                model: self.model,
                manufacturer: Manufacturer {
                    code: self.manufacturer_code,
                    name: self.manufacturer_name,
                },
                number_of_doors: self.number_of_doors,
                fuel_type: self.fuel_type,
                engine: self.engine,
                mileage: self.mileage,
                model_year: self.model_year,
                production_year: self.production_year,
                external_color: self.external_color,
            },
            location: Location::new(self.lat, self.lon),
            price: None,
        })
    }
}

const SELECT_VEHICLE: &str = r#"
    SELECT v.id, v.created_at, v.modified_at, v.condition, v.body, v.model,
           v.manufacturer_code, m.name AS manufacturer_name,
           v.number_of_doors, v.fuel_type, v.engine, v.mileage,
           v.model_year, v.production_year, v.external_color, v.lat, v.lon
    FROM vehicles v
    JOIN manufacturers m ON m.code = v.manufacturer_code
"#;

/// Store de vehículos sobre PostgreSQL
pub struct PostgresVehicleStore {
    pool: PgPool,
}

impl PostgresVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PostgresVehicleStore {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!("{} ORDER BY v.id", SELECT_VEHICLE))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(VehicleRow::into_vehicle).collect()
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!("{} WHERE v.id = $1", SELECT_VEHICLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(VehicleRow::into_vehicle).transpose()
    }

    async fn insert(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        let (id, created_at, modified_at) =
            sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>)>(
                r#"
                INSERT INTO vehicles (condition, body, model, manufacturer_code,
                                      number_of_doors, fuel_type, engine, mileage,
                                      model_year, production_year, external_color, lat, lon)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING id, created_at, modified_at
                "#,
            )
            .bind(vehicle.condition.as_str())
            .bind(&vehicle.details.body)
            .bind(&vehicle.details.model)
            .bind(vehicle.details.manufacturer.code)
            .bind(vehicle.details.number_of_doors)
            .bind(&vehicle.details.fuel_type)
            .bind(&vehicle.details.engine)
            .bind(vehicle.details.mileage)
            .bind(vehicle.details.model_year)
            .bind(vehicle.details.production_year)
            .bind(&vehicle.details.external_color)
            .bind(vehicle.location.lat)
            .bind(vehicle.location.lon)
            .fetch_one(&self.pool)
            .await?;

        vehicle.id = Some(id);
        vehicle.created_at = Some(created_at);
        vehicle.modified_at = Some(modified_at);
        vehicle.clear_transient();
        Ok(vehicle)
    }

    async fn update(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        let id = vehicle
            .id
            .ok_or_else(|| bad_request_error("vehicle id is required for updates"))?;

        let row = sqlx::query_as::<_, (DateTime<Utc>, DateTime<Utc>)>(
            r#"
            UPDATE vehicles
            SET condition = $2, body = $3, model = $4, manufacturer_code = $5,
                number_of_doors = $6, fuel_type = $7, engine = $8, mileage = $9,
                model_year = $10, production_year = $11, external_color = $12,
                lat = $13, lon = $14, modified_at = now()
            WHERE id = $1
            RETURNING created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(vehicle.condition.as_str())
        .bind(&vehicle.details.body)
        .bind(&vehicle.details.model)
        .bind(vehicle.details.manufacturer.code)
        .bind(vehicle.details.number_of_doors)
        .bind(&vehicle.details.fuel_type)
        .bind(&vehicle.details.engine)
        .bind(vehicle.details.mileage)
        .bind(vehicle.details.model_year)
        .bind(vehicle.details.production_year)
        .bind(&vehicle.details.external_color)
        .bind(vehicle.location.lat)
        .bind(vehicle.location.lon)
        .fetch_optional(&self.pool)
        .await?;

        let (created_at, modified_at) = row.ok_or_else(|| not_found_error("Vehicle", id))?;

        vehicle.created_at = Some(created_at);
        vehicle.modified_at = Some(modified_at);
        vehicle.clear_transient();
        Ok(vehicle)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Store de fabricantes sobre PostgreSQL
pub struct PostgresManufacturerStore {
    pool: PgPool,
}

impl PostgresManufacturerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManufacturerStore for PostgresManufacturerStore {
    async fn find_all(&self) -> AppResult<Vec<Manufacturer>> {
        let manufacturers = sqlx::query_as::<_, Manufacturer>(
            "SELECT code, name FROM manufacturers ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(manufacturers)
    }

    async fn find_by_code(&self, code: i32) -> AppResult<Option<Manufacturer>> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "SELECT code, name FROM manufacturers WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manufacturer)
    }

    async fn save(&self, manufacturer: Manufacturer) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO manufacturers (code, name)
            VALUES ($1, $2)
            ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(manufacturer.code)
        .bind(&manufacturer.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
