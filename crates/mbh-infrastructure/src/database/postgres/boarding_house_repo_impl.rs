// ============================================================================
// MBH Infrastructure - PostgreSQL Boarding House Repository
// File: crates/mbh-infrastructure/src/database/postgres/boarding_house_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use mbh_core::domain::{
    BoardingHouse, BoardingHouseStats, BoardingHouseUpdate, HouseListing, LandlordContact,
    NewBoardingHouse,
};
use mbh_core::error::DomainError;
use mbh_core::query::filter::PUBLICLY_LISTED;
use mbh_core::query::{LocatorFilter, NearbyQuery, Predicates};
use mbh_core::repositories::BoardingHouseRepository;
use mbh_shared::constants::EARTH_RADIUS_KM;
use mbh_shared::EntityId;

use crate::database::sql::{db_error, push_where};

const HOUSE_COLUMNS: &str = "bh.id, bh.landlord_id, bh.house_code, bh.house_name, \
     bh.description, bh.address, bh.latitude, bh.longitude, bh.total_rooms, \
     bh.available_rooms, bh.rent_range_min, bh.rent_range_max, bh.amenities, \
     bh.images, bh.is_verified, bh.is_active, bh.created_at, bh.updated_at";

const CONTACT_COLUMNS: &str =
    "l.full_name AS landlord_name, l.email AS landlord_email, l.phone AS landlord_phone";

pub struct PgBoardingHouseRepository {
    pool: PgPool,
}

impl PgBoardingHouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct BoardingHouseRow {
    pub id: i64,
    pub landlord_id: i64,
    pub house_code: String,
    pub house_name: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub rent_range_min: Decimal,
    pub rent_range_max: Decimal,
    pub amenities: Option<String>,
    pub images: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct HouseListingRow {
    #[sqlx(flatten)]
    pub house: BoardingHouseRow,
    pub landlord_name: String,
    pub landlord_email: String,
    pub landlord_phone: Option<String>,
    #[sqlx(default)]
    pub distance: Option<f64>,
}

#[derive(Debug, FromRow)]
struct StatsRow {
    pub total_houses: i64,
    pub verified_houses: i64,
    pub available_rooms: i64,
}

impl From<BoardingHouseRow> for BoardingHouse {
    fn from(row: BoardingHouseRow) -> Self {
        BoardingHouse {
            id: row.id,
            landlord_id: row.landlord_id,
            house_code: row.house_code,
            house_name: row.house_name,
            description: row.description,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            total_rooms: row.total_rooms,
            available_rooms: row.available_rooms,
            rent_range_min: row.rent_range_min,
            rent_range_max: row.rent_range_max,
            amenities: row.amenities,
            images: row.images,
            is_verified: row.is_verified,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<HouseListingRow> for HouseListing {
    fn from(row: HouseListingRow) -> Self {
        HouseListing {
            house: row.house.into(),
            contact: LandlordContact {
                landlord_name: row.landlord_name,
                landlord_email: row.landlord_email,
                landlord_phone: row.landlord_phone,
            },
            distance: row.distance,
        }
    }
}

#[async_trait]
impl BoardingHouseRepository for PgBoardingHouseRepository {
    async fn verified_listings(&self, filter: &LocatorFilter) -> Result<Vec<HouseListing>, DomainError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {}, {} FROM boarding_houses bh \
             INNER JOIN landlords l ON bh.landlord_id = l.id",
            HOUSE_COLUMNS, CONTACT_COLUMNS
        ));
        push_where(&mut qb, &filter.conditions());
        qb.push(" ORDER BY ").push(filter.sort_by.order_clause()).push(", bh.id DESC");

        debug!(sql = qb.sql(), sort_by = filter.sort_by.as_str(), "Listing verified houses");

        let rows: Vec<HouseListingRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing verified houses"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<HouseListing>, DomainError> {
        let sql = format!(
            "SELECT {}, {} FROM boarding_houses bh \
             INNER JOIN landlords l ON bh.landlord_id = l.id \
             WHERE bh.id = $1",
            HOUSE_COLUMNS, CONTACT_COLUMNS
        );
        let row: Option<HouseListingRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding boarding house by id"))?;

        Ok(row.map(Into::into))
    }

    async fn by_landlord(&self, landlord_id: EntityId) -> Result<Vec<BoardingHouse>, DomainError> {
        let sql = format!(
            "SELECT {} FROM boarding_houses bh \
             WHERE bh.landlord_id = $1 AND bh.is_active = TRUE \
             ORDER BY bh.created_at DESC, bh.id DESC",
            HOUSE_COLUMNS
        );
        let rows: Vec<BoardingHouseRow> = sqlx::query_as(&sql)
            .bind(landlord_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing landlord houses"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, house: &NewBoardingHouse) -> Result<EntityId, DomainError> {
        let house_code = house.house_code_or_generate();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO boarding_houses (
                landlord_id, house_code, house_name, description, address,
                latitude, longitude, total_rooms, available_rooms,
                rent_range_min, rent_range_max, amenities, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(house.landlord_id)
        .bind(&house_code)
        .bind(&house.house_name)
        .bind(&house.description)
        .bind(&house.address)
        .bind(house.latitude)
        .bind(house.longitude)
        .bind(house.total_rooms)
        .bind(house.available_rooms)
        .bind(house.rent_range_min)
        .bind(house.rent_range_max)
        .bind(&house.amenities)
        .bind(&house.images)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating boarding house"))?;

        info!(house_id = id, house_code = %house_code, "Boarding house created");
        Ok(id)
    }

    async fn update(&self, id: EntityId, house: &BoardingHouseUpdate) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE boarding_houses
            SET house_name = $2,
                description = $3,
                address = $4,
                latitude = $5,
                longitude = $6,
                total_rooms = $7,
                available_rooms = $8,
                rent_range_min = $9,
                rent_range_max = $10,
                amenities = $11,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&house.house_name)
        .bind(&house.description)
        .bind(&house.address)
        .bind(house.latitude)
        .bind(house.longitude)
        .bind(house.total_rooms)
        .bind(house.available_rooms)
        .bind(house.rent_range_min)
        .bind(house.rent_range_max)
        .bind(&house.amenities)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating boarding house"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_verified(&self, id: EntityId, is_verified: bool) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE boarding_houses
            SET is_verified = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_verified)
        .execute(&self.pool)
        .await
        .map_err(db_error("setting boarding house verified flag"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_active(&self, id: EntityId, is_active: bool) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE boarding_houses
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(db_error("setting boarding house active flag"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: EntityId) -> Result<bool, DomainError> {
        self.set_active(id, false).await
    }

    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<HouseListing>, DomainError> {
        // Distance is computed in a derived table so the outer query can filter on it.
        let sql = format!(
            "SELECT * FROM ( \
                SELECT {}, {}, \
                    $1 * ACOS(LEAST(1.0, GREATEST(-1.0, \
                        COS(RADIANS($2)) * COS(RADIANS(bh.latitude)) \
                        * COS(RADIANS(bh.longitude) - RADIANS($3)) \
                        + SIN(RADIANS($2)) * SIN(RADIANS(bh.latitude))))) AS distance \
                FROM boarding_houses bh \
                INNER JOIN landlords l ON bh.landlord_id = l.id \
                WHERE {} AND bh.latitude IS NOT NULL AND bh.longitude IS NOT NULL \
             ) AS nearby \
             WHERE distance <= $4 \
             ORDER BY distance ASC",
            HOUSE_COLUMNS, CONTACT_COLUMNS, PUBLICLY_LISTED
        );
        let rows: Vec<HouseListingRow> = sqlx::query_as(&sql)
            .bind(EARTH_RADIUS_KM)
            .bind(query.latitude)
            .bind(query.longitude)
            .bind(query.radius_km)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("finding nearby houses"))?;

        debug!(
            latitude = query.latitude,
            longitude = query.longitude,
            radius_km = query.radius_km,
            found = rows.len(),
            "Nearby houses"
        );
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn stats(&self) -> Result<BoardingHouseStats, DomainError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_active = TRUE) AS total_houses,
                COUNT(*) FILTER (WHERE is_active = TRUE AND is_verified = TRUE) AS verified_houses,
                COALESCE(SUM(available_rooms) FILTER (WHERE is_active = TRUE AND is_verified = TRUE), 0)::BIGINT
                    AS available_rooms
            FROM boarding_houses
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("loading boarding house stats"))?;

        Ok(BoardingHouseStats {
            total_houses: row.total_houses,
            verified_houses: row.verified_houses,
            available_rooms: row.available_rooms,
        })
    }
}
