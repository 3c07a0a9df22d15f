use argon2::{
    Argon2, PasswordHasher,
    password_hash::{rand_core::OsRng, SaltString},
};
use chrono::{Duration, Utc};
use kuota_store_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_admin(&pool, "admin", "admin@kcing.store", "admin123").await?;
    seed_products(&pool).await?;
    seed_vouchers(&pool, admin_id).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (admin_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4, 'Administrator', 'admin')
        ON CONFLICT (username) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured admin {username} <{email}>");
    Ok(admin_id)
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Kuota XL/AXIS 120GB", "120GB", 85000_i64),
        ("Kuota XL/AXIS 71GB", "71GB", 65000),
        ("Kuota XL/AXIS 59GB", "59GB", 60000),
        ("Kuota XL/AXIS 48GB", "48GB", 55000),
    ];

    for (title, data_size, price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, title, data_size, price)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE title = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(data_size)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_vouchers(pool: &sqlx::PgPool, admin_id: Uuid) -> anyhow::Result<()> {
    let now = Utc::now();
    let vouchers = vec![
        ("WELCOME10", "percentage", 10_i64, 50000_i64, 100_i32, now + Duration::days(30)),
        ("SAVE5K", "fixed", 5000, 30000, 50, now + Duration::days(15)),
        ("NEWUSER", "percentage", 15, 0, 200, now + Duration::days(60)),
    ];

    for (code, discount_type, discount_value, min_purchase, max_usage, expires_at) in vouchers {
        sqlx::query(
            r#"
            INSERT INTO vouchers (id, code, discount_type, discount_value, min_purchase, max_usage, expires_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(discount_type)
        .bind(discount_value)
        .bind(min_purchase)
        .bind(max_usage)
        .bind(expires_at)
        .bind(admin_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded vouchers");
    Ok(())
}
