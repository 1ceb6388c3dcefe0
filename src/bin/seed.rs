use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use storefront_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin", "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(&pool, "demo", "demo@example.com", "demo123", "user").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    login: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, login, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(login)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {login} (role={role})");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let types = [
        ("Prints", Some("Limited edition art prints")),
        ("Apparel", Some("Shirts and hoodies")),
        ("Accessories", None),
    ];

    for (name, desc) in types {
        sqlx::query(
            r#"
            INSERT INTO product_types (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .execute(pool)
        .await?;
    }

    let products = [
        ("PRN-001", "Sunset Print", "A3 giclee print", 120000, "Prints"),
        ("PRN-002", "Harbor Print", "A2 giclee print", 180000, "Prints"),
        ("APP-001", "Studio Tee", "Organic cotton", 90000, "Apparel"),
        ("ACC-001", "Tote Bag", "Canvas tote", 55000, "Accessories"),
    ];

    for (code, name, desc, price, type_name) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, code, name, description, price, type_id)
            SELECT $1, $2, $3, $4, $5, t.id FROM product_types t WHERE t.name = $6
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(type_name)
        .execute(pool)
        .await?;
    }

    let gallery = [
        ("Morning Mist", "A. Kowalska", 450000),
        ("Old Town", "J. Nowak", 380000),
        ("Blue Interior", "A. Kowalska", 520000),
    ];

    for (title, artist, price) in gallery {
        sqlx::query(
            r#"
            INSERT INTO gallery_items (id, title, artist, price)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM gallery_items WHERE title = $2 AND artist = $3)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(artist)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
