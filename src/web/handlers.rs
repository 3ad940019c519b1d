// Passkeep — HTTP route handlers
//
// Each handler maps 1:1 to a Credential Service operation and echoes its
// typed result as JSON with the corresponding status code (404 NotFound,
// 409 Conflict, 500 internal, 200/201 success).

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::service::{CredentialService, ListFilter, RevealOutcome, ServiceError};

pub type AppState = Arc<CredentialService>;

// ─── Error Mapping ───────────────────────────────────────────────────────────

/// Wrapper that turns a `ServiceError` into a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> u16 {
        self.0.status_code()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult = Result<(StatusCode, Json<Value>), ApiError>;

// ─── Request Bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewOrgRequest {
    pub title: String,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewPasswordRequest {
    pub title: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub title: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountRef {
    pub title: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct OrgRef {
    pub title: String,
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// GET /data — all organizations with their secrets resolved from the
/// vault. A vault miss despite live metadata surfaces as a null password.
pub async fn get_data(State(service): State<AppState>) -> ApiResult {
    let orgs = service.list_organizations(ListFilter::default())?;

    let mut views = Vec::with_capacity(orgs.len());
    for org in &orgs {
        let mut accounts = Vec::with_capacity(org.accounts.len());
        for account in &org.accounts {
            let password = match service.reveal_secret(&org.title, &account.email)? {
                RevealOutcome::Secret(secret) => Some(secret.to_string()),
                RevealOutcome::MissingFromVault => None,
            };
            accounts.push(json!({
                "email": account.email,
                "description": account.description,
                "createdAt": account.created_at.format("%d-%m-%Y").to_string(),
                "password": password,
            }));
        }
        views.push(json!({
            "title": org.title,
            "domain": org.domain,
            "favourite": org.favourite,
            "archived": org.archived,
            "accounts": accounts,
        }));
    }

    Ok((StatusCode::OK, Json(json!({ "orgs": views }))))
}

/// POST /new-org
pub async fn new_org(
    State(service): State<AppState>,
    Json(req): Json<NewOrgRequest>,
) -> ApiResult {
    let collection = service.create_organization(&req.title, req.domain)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "title": req.title, "orgs": collection.orgs.len() })),
    ))
}

/// POST /new-password
pub async fn new_password(
    State(service): State<AppState>,
    Json(req): Json<NewPasswordRequest>,
) -> ApiResult {
    service.add_credential(
        &req.title,
        req.domain,
        &req.email,
        &req.password,
        req.description,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "title": req.title, "email": req.email })),
    ))
}

/// PUT /update-password
pub async fn update_password(
    State(service): State<AppState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> ApiResult {
    service.update_credential(&req.title, &req.email, &req.password)?;
    Ok((StatusCode::OK, Json(json!({ "updated": true }))))
}

/// DELETE /delete-password
pub async fn delete_password(
    State(service): State<AppState>,
    Json(req): Json<AccountRef>,
) -> ApiResult {
    service.delete_credential(&req.title, &req.email)?;
    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}

/// DELETE /delete-org
pub async fn delete_org(State(service): State<AppState>, Json(req): Json<OrgRef>) -> ApiResult {
    service.delete_organization(&req.title)?;
    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}

/// PATCH /favourite
pub async fn favourite(State(service): State<AppState>, Json(req): Json<OrgRef>) -> ApiResult {
    let outcome = service.toggle_favourite(&req.title)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "favourite": outcome.enabled, "message": outcome.message })),
    ))
}

/// PATCH /archive
pub async fn archive(State(service): State<AppState>, Json(req): Json<OrgRef>) -> ApiResult {
    let outcome = service.toggle_archived(&req.title)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "archived": outcome.enabled, "message": outcome.message })),
    ))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MetaStore;
    use crate::vault::mock::MemoryVault;

    fn setup() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::new(dir.path().join("metaData.json"));
        let service = Arc::new(CredentialService::new(store, Arc::new(MemoryVault::new())));
        (dir, service)
    }

    #[tokio::test]
    async fn test_new_org_returns_201() {
        let (_dir, svc) = setup();
        let (status, _body) = new_org(
            State(svc),
            Json(NewOrgRequest {
                title: "Acme".into(),
                domain: Some("acme.com".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_duplicate_org_returns_409() {
        let (_dir, svc) = setup();
        new_org(
            State(svc.clone()),
            Json(NewOrgRequest {
                title: "Acme".into(),
                domain: Some("acme.com".into()),
            }),
        )
        .await
        .unwrap();

        let err = new_org(
            State(svc),
            Json(NewOrgRequest {
                title: "Acme".into(),
                domain: Some("other.com".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), 409);
    }

    #[tokio::test]
    async fn test_delete_password_on_unknown_org_returns_404() {
        let (_dir, svc) = setup();
        let err = delete_password(
            State(svc),
            Json(AccountRef {
                title: "Ghost".into(),
                email: "x@x.com".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_data_resolves_secrets() {
        let (_dir, svc) = setup();
        new_password(
            State(svc.clone()),
            Json(NewPasswordRequest {
                title: "Acme".into(),
                email: "a@acme.com".into(),
                password: "pw1".into(),
                domain: None,
                description: Some("main".into()),
            }),
        )
        .await
        .unwrap();

        let (status, Json(body)) = get_data(State(svc)).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["orgs"][0]["title"], "Acme");
        assert_eq!(body["orgs"][0]["accounts"][0]["password"], "pw1");
        assert_eq!(body["orgs"][0]["accounts"][0]["description"], "main");
    }

    #[tokio::test]
    async fn test_update_then_data_shows_new_secret() {
        let (_dir, svc) = setup();
        new_password(
            State(svc.clone()),
            Json(NewPasswordRequest {
                title: "Acme".into(),
                email: "a@acme.com".into(),
                password: "pw1".into(),
                domain: None,
                description: None,
            }),
        )
        .await
        .unwrap();

        let (status, _) = update_password(
            State(svc.clone()),
            Json(UpdatePasswordRequest {
                title: "Acme".into(),
                email: "a@acme.com".into(),
                password: "pw2".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);

        let (_, Json(body)) = get_data(State(svc)).await.unwrap();
        assert_eq!(body["orgs"][0]["accounts"][0]["password"], "pw2");
    }

    #[tokio::test]
    async fn test_favourite_and_archive_echo_state_and_message() {
        let (_dir, svc) = setup();
        new_org(
            State(svc.clone()),
            Json(NewOrgRequest {
                title: "Acme".into(),
                domain: None,
            }),
        )
        .await
        .unwrap();

        let (_, Json(body)) = favourite(
            State(svc.clone()),
            Json(OrgRef {
                title: "Acme".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body["favourite"], true);
        assert!(body["message"].as_str().unwrap().contains("added to favourites"));

        let (_, Json(body)) = archive(
            State(svc),
            Json(OrgRef {
                title: "Acme".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body["archived"], true);
    }

    #[tokio::test]
    async fn test_delete_org_cascades() {
        let (_dir, svc) = setup();
        new_password(
            State(svc.clone()),
            Json(NewPasswordRequest {
                title: "Acme".into(),
                email: "a@acme.com".into(),
                password: "pw1".into(),
                domain: None,
                description: None,
            }),
        )
        .await
        .unwrap();

        let (status, _) = delete_org(
            State(svc.clone()),
            Json(OrgRef {
                title: "Acme".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);

        let (_, Json(body)) = get_data(State(svc)).await.unwrap();
        assert!(body["orgs"].as_array().unwrap().is_empty());
    }
}
