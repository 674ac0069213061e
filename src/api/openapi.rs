//! OpenAPI specification definition.
//!
//! Aggregates the diagram route handlers and schemas for OpenAPI documentation generation.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::diagrams::create_diagram,
        crate::routes::diagrams::list_diagrams,
        crate::routes::diagrams::search_diagrams,
        crate::routes::diagrams::get_recent_diagram,
        crate::routes::diagrams::get_diagram,
        crate::routes::diagrams::update_diagram,
        crate::routes::diagrams::delete_diagram,
    ),
    components(schemas(
        crate::models::Diagram,
        crate::models::CreateDiagramRequest,
        crate::models::UpdateDiagramRequest,
        crate::models::DeleteDiagramResponse,
    )),
    tags(
        (name = "Diagrams", description = "Stored Mermaid diagram definitions")
    ),
    info(
        title = "Local Mermaid Studio API",
        description = "Store, search and edit Mermaid diagram definitions"
    )
)]
pub struct ApiDoc;
