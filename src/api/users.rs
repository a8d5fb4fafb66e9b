use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    models::{DeleteUserResponse, UserInput, UserResponse, UsersResponse},
    services::UserService,
    utils::AppError,
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    /// Case-sensitive substring matched against name or email
    pub search: Option<String>,
}

fn error_json(e: &AppError) -> HttpResponse {
    use actix_web::ResponseError;
    e.error_response()
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Users in insertion order", body = UsersResponse)
    )
)]
pub async fn list_users(
    users: web::Data<UserService>,
    query: web::Query<UserSearchQuery>,
) -> HttpResponse {
    let search = query.into_inner().search;
    log::info!("👥 GET /users - search: {:?}", search);

    match users.search_users(search.as_deref()) {
        Ok(found) => {
            log::info!("✅ Users retrieved: {}", found.len());
            HttpResponse::Ok().json(UsersResponse {
                success: true,
                count: found.len(),
                users: found,
            })
        }
        Err(e) => {
            log::error!("❌ Failed to list users: {}", e);
            error_json(&e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(users: web::Data<UserService>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("👤 GET /users/{}", id);

    match users.get_user(id) {
        Ok(user) => HttpResponse::Ok().json(UserResponse { success: true, user }),
        Err(e) => {
            log::warn!("⚠️ {}", e);
            error_json(&e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing name or email")
    )
)]
pub async fn create_user(
    users: web::Data<UserService>,
    request: web::Json<UserInput>,
) -> HttpResponse {
    log::info!("📝 POST /users - name: {:?}", request.name);

    let new_user = match request.validate() {
        Ok(new_user) => new_user,
        Err(errors) => {
            log::warn!("⚠️ Invalid user payload: {} error(s)", errors.len());
            return error_json(&AppError::ValidationFailed(errors));
        }
    };

    match users.create_user(new_user) {
        Ok(user) => {
            log::info!("✅ User created: {}", user.id);
            HttpResponse::Created().json(UserResponse { success: true, user })
        }
        Err(e) => {
            log::error!("❌ Failed to create user: {}", e);
            error_json(&e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Missing name or email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    users: web::Data<UserService>,
    path: web::Path<i64>,
    request: web::Json<UserInput>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔧 PUT /users/{}", id);

    // Existence is checked before the payload
    if let Err(e) = users.get_user(id) {
        log::warn!("⚠️ {}", e);
        return error_json(&e);
    }

    let changes = match request.validate() {
        Ok(changes) => changes,
        Err(errors) => return error_json(&AppError::ValidationFailed(errors)),
    };

    match users.update_user(id, changes) {
        Ok(user) => {
            log::info!("✅ User {} updated", id);
            HttpResponse::Ok().json(UserResponse { success: true, user })
        }
        Err(e) => {
            log::warn!("⚠️ Failed to update user {}: {}", id, e);
            error_json(&e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted, or nothing to delete", body = DeleteUserResponse)
    )
)]
pub async fn delete_user(users: web::Data<UserService>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /users/{}", id);

    match users.delete_user(id) {
        Ok(deleted) => HttpResponse::Ok().json(DeleteUserResponse { success: true, deleted }),
        Err(e) => {
            log::error!("❌ Failed to delete user {}: {}", id, e);
            error_json(&e)
        }
    }
}
