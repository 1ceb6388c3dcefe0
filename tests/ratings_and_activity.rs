mod common;

use storefront_api::{
    activity::{ACTIVITY_FEED_CAP, log_activity, recent_activity},
    dto::ratings::AddRatingRequest,
    error::AppError,
    models,
    services::rating_service,
};

#[tokio::test]
async fn one_rating_per_user_and_capped_activity_feed() -> anyhow::Result<()> {
    let state = match common::setup_state().await? {
        Some(s) => s,
        None => return Ok(()),
    };

    let alice = common::create_user(&state, "user", "alice").await?;
    let bob = common::create_user(&state, "user", "bob").await?;

    let product_id = common::create_product(&state, "Rated Print", 1000).await?;
    let gallery_id = common::create_gallery_item(&state, "Rated Canvas", 5000).await?;

    let summary = rating_service::add_rating(
        &state,
        product_id,
        models::SOURCE_PRODUCT,
        &alice,
        AddRatingRequest { value: 5 },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(summary.votes, 1);
    assert_eq!(summary.average, 5.0);
    assert_eq!(summary.my_rating, Some(5));

    // A second vote from the same user hits the unique index.
    let err = rating_service::add_rating(
        &state,
        product_id,
        models::SOURCE_PRODUCT,
        &alice,
        AddRatingRequest { value: 1 },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let summary = rating_service::add_rating(
        &state,
        product_id,
        models::SOURCE_PRODUCT,
        &bob,
        AddRatingRequest { value: 3 },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(summary.votes, 2);
    assert_eq!(summary.average, 4.0);

    // Rating the same target id under a different source is a separate vote.
    rating_service::add_rating(
        &state,
        gallery_id,
        models::SOURCE_GALLERY,
        &alice,
        AddRatingRequest { value: 4 },
    )
    .await?;

    // Anonymous summary carries no my_rating.
    let anon = rating_service::summary(&state, gallery_id, models::SOURCE_GALLERY, None)
        .await?
        .data
        .unwrap();
    assert_eq!(anon.votes, 1);
    assert_eq!(anon.my_rating, None);

    let err = rating_service::add_rating(
        &state,
        product_id,
        models::SOURCE_PRODUCT,
        &bob,
        AddRatingRequest { value: 6 },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // The feed returns at most 20 entries, newest first.
    for i in 0..25 {
        log_activity(
            &state.pool,
            Some(bob.user_id),
            "test_event",
            None,
            Some(serde_json::json!({ "seq": i })),
        )
        .await?;
    }
    let feed = recent_activity(&state.pool, bob.user_id).await?;
    assert_eq!(feed.len(), ACTIVITY_FEED_CAP as usize);

    // Rating activity was recorded for alice.
    let feed = recent_activity(&state.pool, alice.user_id).await?;
    assert!(feed.iter().any(|a| a.action == "rating_added"));

    Ok(())
}
