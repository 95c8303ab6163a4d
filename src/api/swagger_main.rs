use crate::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Todo API",
    description = "CRUD operations over a single to-do resource"
))]
struct TodoServiceApi;

/// Serves the swagger UI at "/swagger-ui" and the OpenAPI schema at "/api-docs/openapi.json".
/// The schema merges the [dto] components with the paths from [super::todo].
pub fn build_documentation() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi_document())
}

pub(crate) fn openapi_document() -> utoipa::openapi::OpenApi {
    let mut api_docs = TodoServiceApi::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::todo::TodoApi::openapi());

    api_docs
}
