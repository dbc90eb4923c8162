//! Gestión de usuarios, mecánicos y horarios de trabajo

use sqlx::PgPool;
use validator::Validate;

use crate::dto::user_dto::{
    CreateMechanicRequest, CreateUserWithRoleRequest, UpdateScheduleRequest, UpdateUserRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::user::{HorarioSemanal, Usuario, UsuarioConHorario};
use crate::repositories::UserRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        rol: Option<&str>,
    ) -> AppResult<Vec<UsuarioConHorario>> {
        require_role(user, &["ADMIN", "JEFE_TALLER", "RECEPCIONISTA"])?;
        self.repository.find_all(rol).await
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: i32) -> AppResult<UsuarioConHorario> {
        // Cada usuario puede ver su propio perfil; el resto requiere rol de gestión
        if user.id != id {
            require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        }
        self.repository
            .find_by_id_with_horario(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", id))
    }

    pub async fn create_mechanic(
        &self,
        user: &AuthenticatedUser,
        request: CreateMechanicRequest,
    ) -> AppResult<ApiResponse<Usuario>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        request.validate()?;

        if self
            .repository
            .exists_email_or_rut(&request.email, request.rut.as_deref())
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
                request.rut.as_deref(),
                &request.email,
                request.telefono.as_deref(),
                "MECANICO",
                &hash,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            usuario,
            "Mecánico creado exitosamente".to_string(),
        ))
    }

    pub async fn create_with_role(
        &self,
        user: &AuthenticatedUser,
        request: CreateUserWithRoleRequest,
    ) -> AppResult<ApiResponse<Usuario>> {
        require_role(user, &["ADMIN"])?;
        request.validate()?;

        if self
            .repository
            .exists_email_or_rut(&request.email, request.rut.as_deref())
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
                request.rut.as_deref(),
                &request.email,
                request.telefono.as_deref(),
                &request.rol,
                &hash,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            usuario,
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: UpdateUserRequest,
    ) -> AppResult<ApiResponse<Usuario>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        request.validate()?;

        let usuario = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Usuario", id))?;

        if let Some(password) = request.password.as_deref() {
            let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
                .map_err(|e| AppError::Hash(e.to_string()))?;
            self.repository.update_password(id, &hash).await?;
        }

        Ok(ApiResponse::success_with_message(
            usuario,
            "Usuario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i32) -> AppResult<()> {
        require_role(user, &["ADMIN"])?;
        if user.id == id {
            return Err(AppError::BadRequest(
                "No puedes eliminar tu propio usuario".to_string(),
            ));
        }
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Usuario", id));
        }
        Ok(())
    }

    pub async fn get_schedule(
        &self,
        user: &AuthenticatedUser,
        id: i32,
    ) -> AppResult<Option<HorarioSemanal>> {
        if user.id != id {
            require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        }
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Usuario", id));
        }
        self.repository.find_horario(id).await
    }

    pub async fn update_schedule(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: UpdateScheduleRequest,
    ) -> AppResult<ApiResponse<HorarioSemanal>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Usuario", id));
        }

        let horario = request.normalizar();
        self.repository.upsert_horario(id, &horario).await?;

        Ok(ApiResponse::success_with_message(
            horario,
            "Horario actualizado exitosamente".to_string(),
        ))
    }
}
