//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, clients, health, models, preferences, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Motorent API",
        version = "0.1.0",
        description = "Motorcycle Rental Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Motorent Team", email = "dev@motorent.es")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        auth::update_user_role,
        // Models
        models::list_models,
        models::get_model,
        models::create_model,
        models::update_model,
        models::delete_model,
        models::upload_model_image,
        // Clients
        clients::list_clients,
        clients::get_client,
        clients::create_client,
        clients::update_client,
        clients::delete_client,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::update_reservation_status,
        reservations::update_reservation_dates,
        // Preferences
        preferences::get_preferences,
        preferences::update_preferences,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            crate::models::user::CreateUser,
            crate::models::user::UpdateRole,
            crate::models::enums::Role,
            // Models
            crate::models::model::Model,
            crate::models::model::CreateModel,
            crate::models::model::UpdateModel,
            crate::models::model::ModelQuery,
            // Clients
            crate::models::client::Client,
            crate::models::client::CreateClient,
            crate::models::client::UpdateClient,
            crate::models::client::ClientQuery,
            // Reservations
            crate::models::enums::ReservationStatus,
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationLine,
            crate::models::reservation::ReservationLineDetails,
            crate::models::reservation::ReservationClient,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::UpdateReservationStatus,
            crate::models::reservation::UpdateReservationDates,
            crate::models::reservation::ReservationQuery,
            // Preferences
            crate::models::enums::Theme,
            crate::models::preferences::UserPreferences,
            crate::models::preferences::UpdatePreferences,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication and accounts"),
        (name = "models", description = "Catalog model management"),
        (name = "clients", description = "Client registry"),
        (name = "reservations", description = "Reservation lifecycle"),
        (name = "preferences", description = "Per-user preferences")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
