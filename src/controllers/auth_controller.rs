//! Lógica de autenticación y registro

use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::user::UsuarioConHorario;
use crate::repositories::UserRepository;
use crate::utils::errors::{conflict_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    /// Validar credenciales y emitir un token de acceso
    pub async fn login(
        &self,
        request: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> AppResult<LoginResponse> {
        request.validate()?;

        let usuario = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !usuario.activo {
            return Err(AppError::Unauthorized("Usuario desactivado".to_string()));
        }

        let valido = bcrypt::verify(&request.password, &usuario.hash_contrasena)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valido {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let access_token = generate_token(usuario.id, &usuario.email, &usuario.rol, jwt_config)?;
        Ok(LoginResponse { access_token })
    }

    /// Registrar un usuario nuevo; reservado a administradores
    pub async fn register(
        &self,
        user: &AuthenticatedUser,
        request: RegisterRequest,
    ) -> AppResult<ApiResponse<RegisterResponse>> {
        require_role(user, &["ADMIN"])?;
        request.validate()?;

        if self
            .repository
            .exists_email_or_rut(&request.email, Some(&request.rut))
            .await?
        {
            return Err(conflict_error("Usuario", "email o rut", &request.email));
        }

        let hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let usuario = self
            .repository
            .create(
                &request.nombre_completo,
                Some(&request.rut),
                &request.email,
                request.telefono.as_deref(),
                &request.rol,
                &hash,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            RegisterResponse {
                id: usuario.id,
                email: usuario.email,
            },
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    /// Perfil del usuario autenticado, con su horario si existe
    pub async fn profile(&self, usuario_id: i32) -> AppResult<UsuarioConHorario> {
        self.repository
            .find_by_id_with_horario(usuario_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }
}
