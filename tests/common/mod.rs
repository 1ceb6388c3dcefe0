use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Statement};
use uuid::Uuid;

use storefront_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        gallery_items::ActiveModel as GalleryActive, product_types::ActiveModel as TypeActive,
        products::ActiveModel as ProductActive, users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    state::AppState,
};

/// Returns None when no database is configured, so the suite can be skipped.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
                );
                return Ok(None);
            }
        };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, cart_items, ratings, comments, activity, products, product_types, gallery_items, pages, news, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(Some(AppState { pool, orm }))
}

pub async fn create_user(state: &AppState, role: &str, login: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        login: Set(login.to_string()),
        email: Set(format!("{login}@example.com")),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: role.into(),
    })
}

pub async fn create_product(state: &AppState, name: &str, price: i64) -> anyhow::Result<Uuid> {
    let type_id = Uuid::new_v4();
    TypeActive {
        id: Set(type_id),
        name: Set(format!("type-{type_id}")),
        description: Set(None),
    }
    .insert(&state.orm)
    .await?;

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        code: Set(format!("code-{}", Uuid::new_v4())),
        name: Set(name.to_string()),
        description: Set(Some("A product for testing".into())),
        price: Set(price),
        image_url: Set(None),
        type_id: Set(type_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(product.id)
}

pub async fn create_gallery_item(state: &AppState, title: &str, price: i64) -> anyhow::Result<Uuid> {
    let item = GalleryActive {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        artist: Set("Test Artist".into()),
        price: Set(price),
        image_url: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(item.id)
}
