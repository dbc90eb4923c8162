//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    state::AppState,
    utils::errors::AppError,
    utils::jwt::verify_token,
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub rol: String,
}

impl AuthenticatedUser {
    /// Verificar si el usuario tiene alguno de los roles indicados
    /// (comparación case-insensitive, como los guards del sistema)
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(&self.rol))
    }
}

/// Verificar rol del usuario autenticado o devolver 403
pub fn require_role(user: &AuthenticatedUser, roles: &[&str]) -> Result<(), AppError> {
    if user.has_any_role(roles) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "No tienes permiso para acceder a este recurso".to_string(),
        ))
    }
}

/// Fila mínima del usuario para validar el token contra la base de datos
#[derive(Debug, sqlx::FromRow)]
struct UsuarioAuthRow {
    id: i32,
    email: String,
    rol: String,
    activo: bool,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let claims = verify_token(auth_header, &state.jwt_config())?;

    // Verificar que el usuario existe en la base de datos
    let user_row = sqlx::query_as::<_, UsuarioAuthRow>(
        "SELECT id, email, rol, activo FROM usuarios WHERE id = $1",
    )
    .bind(claims.sub)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    // Verificar que el usuario esté activo
    if !user_row.activo {
        return Err(AppError::Unauthorized(
            "Usuario desactivado. Contacte al administrador.".to_string(),
        ));
    }

    // Inyectar usuario autenticado en las extensions
    let authenticated_user = AuthenticatedUser {
        id: user_row.id,
        email: user_row.email,
        rol: user_row.rol,
    };
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(rol: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            email: "test@taller.cl".to_string(),
            rol: rol.to_string(),
        }
    }

    #[test]
    fn test_has_any_role_case_insensitive() {
        assert!(user("admin").has_any_role(&["ADMIN", "JEFE_TALLER"]));
        assert!(user("JEFE_TALLER").has_any_role(&["jefe_taller"]));
        assert!(!user("mecanico").has_any_role(&["ADMIN"]));
    }

    #[test]
    fn test_require_role_forbidden() {
        assert!(require_role(&user("CHOFER"), &["ADMIN"]).is_err());
        assert!(require_role(&user("ADMIN"), &["ADMIN"]).is_ok());
    }
}
