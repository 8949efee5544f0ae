//! User management commands.
//!
//! Users created here go through the same validation and hashing as
//! `POST /auth/signup`.

use weezer_server::services::auth::AuthService;
use weezer_server::validation::Validate;
use weezer_server::validation::requests::SignupBody;

use super::{CommandError, connect};

/// Create a new user.
pub async fn create(username: String, name: String, password: String) -> Result<(), CommandError> {
    let signup = SignupBody {
        username: Some(username),
        name: Some(name),
        password: Some(password),
    }
    .validate()?;

    let pool = connect().await?;
    let user = AuthService::new(&pool).register(signup).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");
    Ok(())
}
