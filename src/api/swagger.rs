use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Admin API",
        version = "1.0.0",
        description = "JSON endpoints over the in-memory user store. \n\n**Storage:** records live in process memory and are lost on restart.\n\n**Features:**\n- List and substring search by name or email\n- Create with server-assigned ids\n- Update and delete by id\n- Health monitoring and metrics"
    ),
    paths(
        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Users
            crate::models::User,
            crate::models::UserInput,
            crate::models::FieldError,
            crate::models::UsersResponse,
            crate::models::UserResponse,
            crate::models::DeleteUserResponse,

            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Users", description = "User records: list, search, create, update and delete."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
