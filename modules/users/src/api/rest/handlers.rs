use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;
use tracing::error;

use crate::api::rest::dto::{
    CreateUserReq, RegisterReq, SearchQuery, UpdateUserReq, UserDto, UserListDto,
};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<UserListDto>, ApiError> {
    match svc.get_all().await {
        Ok(users) => Ok(Json(users.into())),
        Err(e) => {
            error!("failed to list users: {}", e);
            Err(e.into())
        }
    }
}

pub async fn list_pending(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<UserListDto>, ApiError> {
    match svc.get_pending().await {
        Ok(users) => Ok(Json(users.into())),
        Err(e) => {
            error!("failed to list pending users: {}", e);
            Err(e.into())
        }
    }
}

pub async fn search_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<UserListDto>, ApiError> {
    match svc.search(&query.q).await {
        Ok(users) => Ok(Json(users.into())),
        Err(e) => {
            error!("failed to search users: {}", e);
            Err(e.into())
        }
    }
}

pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ApiError> {
    match svc.get_user(id).await {
        Ok(user) => Ok(Json(user.into())),
        Err(e) => {
            error!("failed to get user {}: {}", id, e);
            Err(e.into())
        }
    }
}

pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user.into()))),
        Err(e) => {
            error!("failed to create user: {}", e);
            Err(e.into())
        }
    }
}

pub async fn register_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    match svc.register(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user.into()))),
        Err(e) => {
            error!("failed to register user: {}", e);
            Err(e.into())
        }
    }
}

pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, ApiError> {
    match svc.update_user(id, req.into()).await {
        Ok(user) => Ok(Json(user.into())),
        Err(e) => {
            error!("failed to update user {}: {}", id, e);
            Err(e.into())
        }
    }
}

pub async fn approve_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ApiError> {
    match svc.approve(id).await {
        Ok(user) => Ok(Json(user.into())),
        Err(e) => {
            error!("failed to approve user {}: {}", id, e);
            Err(e.into())
        }
    }
}

pub async fn block_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ApiError> {
    match svc.block(id).await {
        Ok(user) => Ok(Json(user.into())),
        Err(e) => {
            error!("failed to block user {}: {}", id, e);
            Err(e.into())
        }
    }
}

pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    match svc.delete_user(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("failed to delete user {}: {}", id, e);
            Err(e.into())
        }
    }
}
