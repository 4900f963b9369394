//! Repository tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p mbh-infrastructure -- --ignored`.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use mbh_core::domain::{
    ActivityLog, LandlordPaymentStatus, NewActivity, NewBoardingHouse, NewLandlord, NewPayment, PaymentStatus,
    SubscriptionPlan, UserType, VerificationChange, VerificationStatus,
};
use mbh_core::query::{LandlordFilter, LocatorFilter, NearbyQuery, PageRequest, PaymentFilter, SortBy};
use mbh_core::repositories::{
    ActivityLogRepository, BoardingHouseRepository, LandlordRepository, PaymentRepository,
};
use mbh_infrastructure::{
    PgActivityLogRepository, PgBoardingHouseRepository, PgLandlordRepository, PgPaymentRepository,
};

async fn listed_landlord(pool: &PgPool, email: &str) -> i64 {
    let repo = PgLandlordRepository::new(pool.clone());
    let id = repo
        .create(&NewLandlord {
            full_name: "Maria Santos".into(),
            email: email.into(),
            phone: "+63 917 555 0101".into(),
            password_hash: "$2y$10$placeholder".into(),
            address: Some("Cebu City".into()),
        })
        .await
        .unwrap();
    repo.update_verification(id, &VerificationChange::verify("basic", Utc::now()))
        .await
        .unwrap();
    repo.update_payment_status(id, LandlordPaymentStatus::Paid)
        .await
        .unwrap();
    id
}

async fn listed_house(pool: &PgPool, landlord_id: i64, name: &str, min: i64, max: i64, coords: Option<(f64, f64)>) -> i64 {
    let repo = PgBoardingHouseRepository::new(pool.clone());
    let id = repo
        .create(&NewBoardingHouse {
            landlord_id,
            house_code: None,
            house_name: name.into(),
            description: None,
            address: "12 Gorordo Ave, Lahug, Cebu City".into(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            total_rooms: 10,
            available_rooms: 4,
            rent_range_min: Decimal::from(min),
            rent_range_max: Decimal::from(max),
            amenities: None,
            images: None,
        })
        .await
        .unwrap();
    repo.set_verified(id, true).await.unwrap();
    id
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn verify_sets_plan_and_expiry(pool: PgPool) {
    let repo = PgLandlordRepository::new(pool.clone());
    let id = listed_landlord(&pool, "expiry@example.com").await;

    let stored = repo.find_by_id(id).await.unwrap().unwrap().landlord;
    assert_eq!(stored.verification_status, VerificationStatus::Verified);
    assert_eq!(stored.subscription_plan, Some(SubscriptionPlan::Basic));
    let expires = stored.subscription_expires_at.unwrap();
    assert!(expires > Utc::now() + Duration::days(27));
    assert!(expires < Utc::now() + Duration::days(32));

    repo.update_verification(id, &VerificationChange::verify("gold", Utc::now()))
        .await
        .unwrap();
    let stored = repo.find_by_id(id).await.unwrap().unwrap().landlord;
    assert_eq!(stored.subscription_plan, None);
    assert_eq!(stored.subscription_expires_at, None);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn update_on_missing_row_reports_false(pool: PgPool) {
    let repo = PgLandlordRepository::new(pool);
    assert!(!repo.set_active(424242, false).await.unwrap());
    assert!(!repo
        .update_verification(424242, &VerificationChange::Reject)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn soft_delete_hides_from_active_listings_only(pool: PgPool) {
    let landlords = PgLandlordRepository::new(pool.clone());
    let houses = PgBoardingHouseRepository::new(pool.clone());
    let landlord_id = listed_landlord(&pool, "soft@example.com").await;
    let house_id = listed_house(&pool, landlord_id, "Sunrise Dorm", 2000, 4000, None).await;

    assert!(houses.soft_delete(house_id).await.unwrap());
    assert!(houses.verified_listings(&LocatorFilter::default()).await.unwrap().is_empty());
    assert!(houses.by_landlord(landlord_id).await.unwrap().is_empty());
    assert!(houses.find_by_id(house_id).await.unwrap().is_some());

    assert!(landlords.soft_delete(landlord_id).await.unwrap());
    let filter = LandlordFilter::default();
    assert_eq!(landlords.count(&filter).await.unwrap(), 0);
    assert!(landlords.find_by_id(landlord_id).await.unwrap().is_some());

    let in_table: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boarding_houses WHERE id = $1")
        .bind(house_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(in_table, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn locator_sentinel_prices_match_unfiltered(pool: PgPool) {
    let houses = PgBoardingHouseRepository::new(pool.clone());
    let landlord_id = listed_landlord(&pool, "locator@example.com").await;
    listed_house(&pool, landlord_id, "Budget Bunk", 800, 1500, None).await;
    listed_house(&pool, landlord_id, "Premium Suites", 6000, 12000, None).await;

    let unfiltered = houses
        .verified_listings(&LocatorFilter::new(None, None, None, SortBy::Newest))
        .await
        .unwrap();
    let sentinel = houses
        .verified_listings(&LocatorFilter::new(
            None,
            Some(Decimal::ZERO),
            Some(Decimal::from(999_999)),
            SortBy::Newest,
        ))
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), 2);
    assert_eq!(unfiltered, sentinel);

    let cheap_first = houses
        .verified_listings(&LocatorFilter::new(None, None, Some(Decimal::from(5000)), SortBy::PriceLow))
        .await
        .unwrap();
    assert_eq!(cheap_first.len(), 1);
    assert_eq!(cheap_first[0].house.house_name, "Budget Bunk");

    let search = houses
        .verified_listings(&LocatorFilter::new(Some("premium".into()), None, None, SortBy::Newest))
        .await
        .unwrap();
    assert_eq!(search.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn nearby_orders_by_distance(pool: PgPool) {
    let houses = PgBoardingHouseRepository::new(pool.clone());
    let landlord_id = listed_landlord(&pool, "nearby@example.com").await;
    listed_house(&pool, landlord_id, "Far", 1000, 2000, Some((10.40, 123.95))).await;
    listed_house(&pool, landlord_id, "Near", 1000, 2000, Some((10.3160, 123.8860))).await;
    listed_house(&pool, landlord_id, "Manila", 1000, 2000, Some((14.5995, 120.9842))).await;
    listed_house(&pool, landlord_id, "No coordinates", 1000, 2000, None).await;

    let query = NearbyQuery::new(10.3157, 123.8854, Some(15.0)).unwrap();
    let found = houses.nearby(&query).await.unwrap();

    let names: Vec<&str> = found.iter().map(|h| h.house.house_name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Far"]);
    assert!(found[0].distance.unwrap() < 1.0);
    assert!(found.iter().all(|h| h.distance.unwrap() <= 15.0));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn payment_notes_are_appended(pool: PgPool) {
    let payments = PgPaymentRepository::new(pool.clone());
    let landlord_id = listed_landlord(&pool, "payments@example.com").await;
    let house_id = listed_house(&pool, landlord_id, "Sunrise Dorm", 2000, 4000, None).await;
    let tenant_id: i64 = sqlx::query_scalar(
        "INSERT INTO tenants (full_name, email) VALUES ('Ana Cruz', 'ana@example.com') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let payment_id = payments
        .create(&NewPayment {
            tenant_id,
            landlord_id,
            boarding_house_id: house_id,
            amount: Decimal::from(2500),
            payment_type: "monthly_rent".into(),
            payment_method: Some("gcash".into()),
            status: PaymentStatus::Pending,
            due_date: None,
            reference_number: Some("REF-1".into()),
            notes: Some("first".into()),
        })
        .await
        .unwrap();

    payments
        .update_status(payment_id, PaymentStatus::Completed, "second")
        .await
        .unwrap();
    payments
        .update_status(payment_id, PaymentStatus::Completed, "")
        .await
        .unwrap();

    let details = payments.find_by_id(payment_id).await.unwrap().unwrap();
    assert_eq!(details.payment.status, PaymentStatus::Completed);
    assert_eq!(details.payment.notes.as_deref(), Some("first second"));
    assert_eq!(details.tenant_name, "Ana Cruz");

    let filter = PaymentFilter::from_params(Some("completed".into()), None, None, None, Some("ana".into()));
    assert_eq!(payments.count(&filter).await.unwrap(), 1);
    let beyond = payments.list(&filter, PageRequest::new(5, 10)).await.unwrap();
    assert!(beyond.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore]
async fn recent_activity_resolves_user_name(pool: PgPool) {
    let activity = PgActivityLogRepository::new(pool.clone());
    let admin_id: i64 = sqlx::query_scalar(
        "INSERT INTO admins (username, email, password_hash, full_name) \
         VALUES ('admin', 'admin@example.com', 'x', 'System Administrator') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    activity
        .record(&NewActivity::new(UserType::Admin, admin_id, "login").with_description("Admin logged in"))
        .await
        .unwrap();

    let recent: Vec<ActivityLog> = activity.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].user_name.as_deref(), Some("System Administrator"));
}
