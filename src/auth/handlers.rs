use crate::{
    auth::{credentials::authenticate, jwt::generate_session_token},
    config::Config,
    error::AppError,
    models::{LoginReqDto, LoginResponse},
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, info, instrument};

/// Log in with the configured credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Session started", body = LoginResponse),
        (status = 401, description = "Credential mismatch", body = Object, example = json!({
            "message": "Invalid username or password. Please try again."
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if !authenticate(&config, &user.username, &user.password) {
        info!("Invalid credentials");
        return Ok(HttpResponse::Unauthorized().json(json!({
            "message": "Invalid username or password. Please try again."
        })));
    }

    let (access_token, claims) =
        generate_session_token(&user.username, &config.jwt_secret, config.session_ttl)?;
    debug!(session_id = %claims.jti, "Session token issued");

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        expires_in: config.session_ttl,
    }))
}
