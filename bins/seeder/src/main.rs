//! Database seeder for BankLink development and testing.
//!
//! Seeds a test user and two default accounts for local development.
//!
//! Usage: cargo run --bin seeder

use banklink_db::entities::{bank_accounts, sea_orm_active_enums::AccountStatus, users};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Test user ID (consistent for all seeds)
const TEST_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test user password for local development
const TEST_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = banklink_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test user...");
    seed_test_user(&db).await;

    println!("Seeding default accounts...");
    seed_account(&db, "ACC001", "Cheque", dec!(1000.00)).await;
    seed_account(&db, "SAV001", "Savings", dec!(1000.00)).await;

    println!("Seeding complete!");
}

fn test_user_id() -> Uuid {
    Uuid::parse_str(TEST_USER_ID).unwrap()
}

/// Seeds a test user for development.
async fn seed_test_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(test_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test user already exists, skipping...");
        return;
    }

    let password_hash =
        banklink_core::auth::hash_password(TEST_PASSWORD).expect("Failed to hash test password");

    let user = users::ActiveModel {
        id: Set(test_user_id()),
        email: Set("test@banklink.dev".to_string()),
        password_hash: Set(password_hash),
        full_name: Set("Test User".to_string()),
        id_number: Set("9001015009087".to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert test user: {e}");
    } else {
        println!("  Created test user: test@banklink.dev");
    }
}

/// Seeds a default account for development.
async fn seed_account(db: &DatabaseConnection, id: &str, account_type: &str, balance: Decimal) {
    if bank_accounts::Entity::find_by_id(id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Account {id} already exists, skipping...");
        return;
    }

    let account = bank_accounts::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(Some(test_user_id())),
        account_type: Set(account_type.to_string()),
        balance: Set(balance),
        overdraft_limit: Set(Decimal::ZERO),
        status: Set(AccountStatus::Active),
        currency: Set("ZAR".to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = account.insert(db).await {
        eprintln!("Failed to insert account {id}: {e}");
    } else {
        println!("  Created account {id} ({account_type}) with balance {balance}");
    }
}
