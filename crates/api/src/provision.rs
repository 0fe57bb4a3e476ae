//! First-boot provisioning of the initial operator account.

use uuid::Uuid;
use warden_core::types::now_ms;
use warden_db::models::user::CreateUser;
use warden_db::repositories::UserRepo;
use warden_db::DbPool;

use crate::auth::password::{generate_password, hash_password};

/// Length of the generated initial admin password.
const GENERATED_PASSWORD_LEN: usize = 20;

/// Create the initial `admin` account if no users exist yet.
///
/// The generated password is logged exactly once, at WARN level, so it
/// shows up even under a quiet log filter. It cannot be recovered later;
/// operators are expected to note it on first boot.
pub async fn ensure_admin(pool: &DbPool) -> Result<(), sqlx::Error> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let password = generate_password(GENERATED_PASSWORD_LEN);
    let password_hash =
        hash_password(&password).expect("argon2 hashing with default params cannot fail");

    let input = CreateUser {
        id: Uuid::new_v4(),
        name: "admin".to_string(),
        password_hash,
        permissions: 0,
        created_at: now_ms(),
    };
    UserRepo::create(pool, &input).await?;

    tracing::warn!(
        username = "admin",
        %password,
        "provisioned initial admin account; note these credentials"
    );

    Ok(())
}
