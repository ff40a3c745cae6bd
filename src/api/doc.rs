use utoipa::OpenApi;

pub const TURN_TAG: &str = "Turns";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Turnero",
        description = "Appointment booking API for a barber shop",
    ),
    paths(
        crate::api::handlers::turns::create_turn,
        crate::api::handlers::turns::get_turns,
        crate::api::handlers::turns::get_turn,
        crate::api::handlers::turns::update_turn,
        crate::api::handlers::turns::delete_turn,
        crate::api::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::MessageResponse,
            crate::api::dto::TurnRequest,
            crate::api::dto::TurnResponse,
            crate::api::dto::TurnsResponse,
            crate::api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = TURN_TAG, description = "Turn booking endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_turn_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/api/turns"));
        assert!(paths.contains_key("/api/turns/{id}"));
        assert!(paths.contains_key("/health"));
    }
}
