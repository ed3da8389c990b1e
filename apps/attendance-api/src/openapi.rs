//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "0.1.0",
        description = "Event attendance with capacity enforcement, cache-aside reads and occupancy statistics",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/events", api = domain_attendance::StatsApiDoc),
        (path = "/api/participants", api = domain_participants::ApiDoc),
        (path = "/api/attendance", api = domain_attendance::ApiDoc)
    ),
    tags(
        (name = "Events", description = "Event directory"),
        (name = "Participants", description = "Participant directory"),
        (name = "Attendance", description = "Registration and attendance rosters"),
        (name = "Statistics", description = "Event occupancy")
    )
)]
pub struct ApiDoc;
