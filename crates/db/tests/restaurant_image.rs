//! Integration tests for restaurant images and the single-representative rule.
//!
//! Exercises `RestaurantImageRepo` against a real database:
//! - Non-representative images are unrestricted
//! - A second representative image is rejected on create and on update
//! - Re-saving the current representative image is allowed
//! - Moving an image re-checks the target restaurant
//! - `promote_representative` swaps the flag atomically
//! - Concurrent representative creates produce exactly one winner

use assert_matches::assert_matches;
use matzip_core::error::CoreError;
use matzip_db::models::restaurant::CreateRestaurant;
use matzip_db::models::restaurant_image::{CreateRestaurantImage, UpdateRestaurantImage};
use matzip_db::repositories::{RestaurantImageRepo, RestaurantRepo};
use matzip_db::DbError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_restaurant(name: &str) -> CreateRestaurant {
    CreateRestaurant {
        name: name.to_string(),
        branch_name: None,
        description: None,
        address: "Seoul, Mapo-gu 12".to_string(),
        feature: None,
        is_closed: None,
        latitude: None,
        longitude: None,
        phone: "+8225550000".to_string(),
        rating: None,
        rating_count: None,
        start_time: None,
        end_time: None,
        last_order_time: None,
        category_id: None,
        region_id: None,
        tag_ids: Vec::new(),
    }
}

fn new_image(restaurant_id: i64, representative: bool, key: &str) -> CreateRestaurantImage {
    CreateRestaurantImage {
        restaurant_id,
        is_representative: Some(representative),
        name: None,
        image: key.to_string(),
        sort_order: None,
    }
}

async fn restaurant(pool: &PgPool, name: &str) -> i64 {
    RestaurantRepo::create(pool, &new_restaurant(name))
        .await
        .unwrap()
        .id
}

async fn representative_count(pool: &PgPool, restaurant_id: i64) -> usize {
    RestaurantImageRepo::list_representative(pool, restaurant_id)
        .await
        .unwrap()
        .len()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_representative_images_are_unrestricted(pool: PgPool) {
    let rid = restaurant(&pool, "Mapo Galbi").await;

    for i in 0..3 {
        RestaurantImageRepo::create(&pool, &new_image(rid, false, &format!("restaurant/{i}.png")))
            .await
            .unwrap();
    }

    let images = RestaurantImageRepo::list_by_restaurant(&pool, rid).await.unwrap();
    assert_eq!(images.len(), 3);
    assert!(images.iter().all(|i| !i.is_representative && i.sort_order == 0));
    assert_eq!(representative_count(&pool, rid).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_representative_is_rejected(pool: PgPool) {
    let rid = restaurant(&pool, "Euljiro Noodles").await;

    let first = RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();
    assert!(first.is_representative);

    let err = RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/b.png"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvariantViolation(_)));

    // Nothing persisted by the failed write.
    let images = RestaurantImageRepo::list_by_restaurant(&pool, rid).await.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn representative_rule_is_per_restaurant(pool: PgPool) {
    let a = restaurant(&pool, "A").await;
    let b = restaurant(&pool, "B").await;

    RestaurantImageRepo::create(&pool, &new_image(a, true, "restaurant/a.png"))
        .await
        .unwrap();
    RestaurantImageRepo::create(&pool, &new_image(b, true, "restaurant/b.png"))
        .await
        .unwrap();

    assert_eq!(representative_count(&pool, a).await, 1);
    assert_eq!(representative_count(&pool, b).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_missing_restaurant_is_not_found(pool: PgPool) {
    let err = RestaurantImageRepo::create(&pool, &new_image(999_999, true, "restaurant/x.png"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "Restaurant", id: 999_999 })
    );
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resaving_current_representative_is_allowed(pool: PgPool) {
    let rid = restaurant(&pool, "Seongsu Bakery").await;
    let image = RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();

    let update = UpdateRestaurantImage {
        is_representative: Some(true),
        name: Some("Storefront".to_string()),
        ..Default::default()
    };
    let updated = RestaurantImageRepo::update(&pool, image.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert!(updated.is_representative);
    assert_eq!(updated.name.as_deref(), Some("Storefront"));
    assert!(updated.updated_at >= image.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn flipping_second_image_to_representative_is_rejected(pool: PgPool) {
    let rid = restaurant(&pool, "Hannam Sushi").await;
    RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();
    let other = RestaurantImageRepo::create(&pool, &new_image(rid, false, "restaurant/b.png"))
        .await
        .unwrap();

    let update = UpdateRestaurantImage {
        is_representative: Some(true),
        ..Default::default()
    };
    let err = RestaurantImageRepo::update(&pool, other.id, &update)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvariantViolation(_)));

    let reloaded = RestaurantImageRepo::find_by_id(&pool, other.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!reloaded.is_representative);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clearing_then_setting_another_representative_succeeds(pool: PgPool) {
    let rid = restaurant(&pool, "Itaewon Tacos").await;
    let first = RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();
    let second = RestaurantImageRepo::create(&pool, &new_image(rid, false, "restaurant/b.png"))
        .await
        .unwrap();

    let clear = UpdateRestaurantImage {
        is_representative: Some(false),
        ..Default::default()
    };
    RestaurantImageRepo::update(&pool, first.id, &clear)
        .await
        .unwrap()
        .unwrap();

    let set = UpdateRestaurantImage {
        is_representative: Some(true),
        ..Default::default()
    };
    RestaurantImageRepo::update(&pool, second.id, &set)
        .await
        .unwrap()
        .unwrap();

    let rep = RestaurantImageRepo::find_representative(&pool, rid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rep.id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_representative_checks_target_restaurant(pool: PgPool) {
    let a = restaurant(&pool, "A").await;
    let b = restaurant(&pool, "B").await;
    let image_a = RestaurantImageRepo::create(&pool, &new_image(a, true, "restaurant/a.png"))
        .await
        .unwrap();
    RestaurantImageRepo::create(&pool, &new_image(b, true, "restaurant/b.png"))
        .await
        .unwrap();

    let mv = UpdateRestaurantImage {
        restaurant_id: Some(b),
        ..Default::default()
    };
    let err = RestaurantImageRepo::update(&pool, image_a.id, &mv)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvariantViolation(_)));

    // Moving it as a plain image is fine.
    let mv_plain = UpdateRestaurantImage {
        restaurant_id: Some(b),
        is_representative: Some(false),
        ..Default::default()
    };
    let moved = RestaurantImageRepo::update(&pool, image_a.id, &mv_plain)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.restaurant_id, b);
    assert_eq!(representative_count(&pool, a).await, 0);
    assert_eq!(representative_count(&pool, b).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_image_returns_none(pool: PgPool) {
    let result = RestaurantImageRepo::update(&pool, 424_242, &UpdateRestaurantImage::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Promote / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn promote_swaps_representative(pool: PgPool) {
    let rid = restaurant(&pool, "Jongno Bossam").await;
    let first = RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();
    let second = RestaurantImageRepo::create(&pool, &new_image(rid, false, "restaurant/b.png"))
        .await
        .unwrap();

    let promoted = RestaurantImageRepo::promote_representative(&pool, rid, second.id)
        .await
        .unwrap()
        .unwrap();
    assert!(promoted.is_representative);

    let first = RestaurantImageRepo::find_by_id(&pool, first.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!first.is_representative);
    assert_eq!(representative_count(&pool, rid).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn promote_foreign_image_changes_nothing(pool: PgPool) {
    let a = restaurant(&pool, "A").await;
    let b = restaurant(&pool, "B").await;
    let rep_a = RestaurantImageRepo::create(&pool, &new_image(a, true, "restaurant/a.png"))
        .await
        .unwrap();
    let img_b = RestaurantImageRepo::create(&pool, &new_image(b, false, "restaurant/b.png"))
        .await
        .unwrap();

    let result = RestaurantImageRepo::promote_representative(&pool, a, img_b.id)
        .await
        .unwrap();
    assert!(result.is_none());

    let current = RestaurantImageRepo::find_representative(&pool, a)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.id, rep_a.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_representative_frees_the_slot(pool: PgPool) {
    let rid = restaurant(&pool, "Yeonnam Cafe").await;
    let rep = RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();

    assert!(RestaurantImageRepo::delete(&pool, rid, rep.id).await.unwrap());
    assert!(!RestaurantImageRepo::delete(&pool, rid, rep.id).await.unwrap());

    RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/b.png"))
        .await
        .unwrap();
    assert_eq!(representative_count(&pool, rid).await, 1);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_representative_creates_admit_one(pool: PgPool) {
    let rid = restaurant(&pool, "Busy Place").await;

    let first = new_image(rid, true, "restaurant/a.png");
    let second = new_image(rid, true, "restaurant/b.png");
    let (a, b) = tokio::join!(
        RestaurantImageRepo::create(&pool, &first),
        RestaurantImageRepo::create(&pool, &second),
    );

    let results = [a, b];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1, "exactly one concurrent create should win");
    for result in &results {
        if let Err(err) = result {
            assert_matches!(err, DbError::Core(CoreError::InvariantViolation(_)));
        }
    }
    assert_eq!(representative_count(&pool, rid).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_index_backstops_direct_writes(pool: PgPool) {
    let rid = restaurant(&pool, "Raw SQL").await;
    RestaurantImageRepo::create(&pool, &new_image(rid, true, "restaurant/a.png"))
        .await
        .unwrap();

    let err = sqlx::query(
        "INSERT INTO restaurant_images (restaurant_id, is_representative, image) \
         VALUES ($1, true, 'restaurant/b.png')",
    )
    .bind(rid)
    .execute(&pool)
    .await
    .unwrap_err();

    assert_matches!(
        DbError::from(err),
        DbError::Core(CoreError::InvariantViolation(_))
    );
}
