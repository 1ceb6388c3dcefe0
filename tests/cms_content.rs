mod common;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use storefront_api::{dto::cms::UpsertContentRequest, error::AppError, routes::cms};

fn entry(link_title: &str, title: &str, display_order: i32) -> UpsertContentRequest {
    UpsertContentRequest {
        link_title: link_title.into(),
        title: title.into(),
        content: Some("Lorem ipsum".into()),
        display_order,
    }
}

// Pages and news: admin-only mutations, title bounds, display_order listing.
#[tokio::test]
async fn pages_and_news_follow_display_order() -> anyhow::Result<()> {
    let state = match common::setup_state().await? {
        Some(s) => s,
        None => return Ok(()),
    };

    let admin = common::create_user(&state, "admin", "cms-admin").await?;
    let visitor = common::create_user(&state, "user", "cms-visitor").await?;

    let err = cms::create_page(
        State(state.clone()),
        visitor.clone(),
        Json(entry("About", "About us", 1)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = cms::create_page(
        State(state.clone()),
        admin.clone(),
        Json(entry(&"x".repeat(31), "About us", 1)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Created out of order; the listing sorts by display_order.
    cms::create_page(
        State(state.clone()),
        admin.clone(),
        Json(entry("Contact", "Contact", 2)),
    )
    .await?;
    let about = cms::create_page(
        State(state.clone()),
        admin.clone(),
        Json(entry("About", "About us", 1)),
    )
    .await?
    .0
    .data
    .unwrap();

    let pages = cms::list_pages(State(state.clone())).await?.0.data.unwrap();
    let titles: Vec<&str> = pages.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["About us", "Contact"]);

    let fetched = cms::get_page(Path(about.id), State(state.clone()))
        .await?
        .0
        .data
        .unwrap();
    assert_eq!(fetched.link_title, "About");

    let err = cms::get_page(Path(Uuid::new_v4()), State(state.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let updated = cms::update_page(
        State(state.clone()),
        admin.clone(),
        Path(about.id),
        Json(entry("About", "Our story", 3)),
    )
    .await?
    .0
    .data
    .unwrap();
    assert_eq!(updated.title, "Our story");
    assert_eq!(updated.display_order, 3);

    let pages = cms::list_pages(State(state.clone())).await?.0.data.unwrap();
    let titles: Vec<&str> = pages.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Contact", "Our story"]);

    // News is a separate table with the same contract.
    let launch = cms::create_news(
        State(state.clone()),
        admin.clone(),
        Json(entry("Launch", "Shop launch", 1)),
    )
    .await?
    .0
    .data
    .unwrap();
    let news = cms::list_news(State(state.clone())).await?.0.data.unwrap();
    assert_eq!(news.items.len(), 1);
    let pages = cms::list_pages(State(state.clone())).await?.0.data.unwrap();
    assert_eq!(pages.items.len(), 2);

    cms::delete_news(State(state.clone()), admin.clone(), Path(launch.id)).await?;
    let err = cms::delete_news(State(state.clone()), admin.clone(), Path(launch.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}
