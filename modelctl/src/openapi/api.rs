use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Registers the `BearerAuth` scheme referenced by the protected routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token from `POST /login`. Send it in the `Authorization` header:\n\n\
                            ```\nAuthorization: Bearer <token>\n```\n\n\
                            Tokens expire one hour after login by default.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api", description = "Modelo API")
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::login,
        api::handlers::modelos::list_modelos,
        api::handlers::modelos::create_modelo,
        api::handlers::modelos::update_modelo,
        api::handlers::modelos::delete_modelo,
    ),
    components(
        schemas(
            api::models::auth::LoginRequest,
            api::models::auth::LoginResponse,
            api::models::modelos::ModeloCreate,
            api::models::modelos::ModeloUpdate,
            api::models::modelos::ModeloResponse,
            api::models::modelos::DeleteResponse,
            api::models::errors::ErrorResponse,
            crate::types::Gama,
            crate::validation::ValidationReason,
        )
    ),
    tags(
        (name = "authentication", description = "Obtain a session token"),
        (name = "modelos", description = "Manage technology model records"),
    ),
    info(
        title = "Modelos API",
        description = "Manage technology model records (modelos).

Log in with `POST /login` to get a token, then send it as `Authorization: Bearer <token>` on every `/modelos` request.

Errors are returned as JSON:

```json
{
  \"error\": \"Gama debe ser 'baja', 'media' o 'alta'\",
  \"field\": \"gama\",
  \"reason\": \"tier_value\"
}
```

`field` and `reason` are only present for validation errors.",
    ),
)]
pub struct ApiDoc;
