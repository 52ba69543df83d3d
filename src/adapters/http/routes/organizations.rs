use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::{
        jwt,
        pager::Pager,
        ports::identity_service::MemberRef,
        use_cases::{
            directory::{DirectoryRow, DirectorySnapshot},
            invitation::AuthenticatedUser,
            membership::RemovalOutcome,
        },
    },
    domain::entities::{
        invitation::InvitationStatus, member::MemberRole, plan::SubscriptionPlan,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{org_id}/directory", get(get_directory))
        .route("/{org_id}/invitations", post(create_invitation))
        .route(
            "/{org_id}/invitations/{invitation_id}",
            delete(revoke_invitation),
        )
        .route("/{org_id}/members/{member_id}", patch(update_member_role))
        .route("/{org_id}/members", delete(remove_member))
}

/// Extracts the authenticated user and their plan from the session cookie.
/// Handlers pass both into use cases explicitly; there is no ambient
/// session state below this point.
fn session(jar: &CookieJar, app_state: &AppState) -> Option<(AuthenticatedUser, SubscriptionPlan)> {
    let cookie = jar.get("session_token")?;
    let claims = jwt::verify_session(cookie.value(), &app_state.config.jwt_secret).ok()?;
    let user_id = Uuid::parse_str(&claims.sub).ok()?;

    Some((
        AuthenticatedUser {
            id: user_id,
            email: claims.email,
        },
        SubscriptionPlan::parse(&claims.plan),
    ))
}

// ============================================================================
// Directory
// ============================================================================

#[derive(Deserialize)]
struct DirectoryQuery {
    offset: Option<usize>,
}

#[derive(Serialize)]
struct DirectoryRowResponse {
    kind: &'static str,
    id: Uuid,
    email: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    badge: String,
    date: String,
    expired: bool,
    can_revoke: bool,
}

impl DirectoryRowResponse {
    fn from_row(row: DirectoryRow<'_>, now: chrono::NaiveDateTime) -> Self {
        match row {
            DirectoryRow::Member(m) => Self {
                kind: "member",
                id: m.id,
                email: m.email.clone(),
                display_name: Some(m.display_name.clone()),
                avatar_url: m.avatar_url.clone(),
                badge: m.role.as_str().to_string(),
                date: human_date(m.created_at),
                expired: false,
                can_revoke: false,
            },
            DirectoryRow::Invitation(i) => Self {
                kind: "invitation",
                id: i.id,
                email: i.email.clone(),
                display_name: None,
                avatar_url: None,
                badge: i.status.as_str().to_string(),
                date: human_date(i.created_at),
                expired: i.is_expired(now),
                // Only pending invitations offer the revoke action.
                can_revoke: i.status == InvitationStatus::Pending,
            },
        }
    }
}

#[derive(Serialize)]
struct DirectoryPageResponse {
    rows: Vec<DirectoryRowResponse>,
    total: usize,
    total_pages: usize,
    current_page: usize,
    offset: usize,
    invite_link: String,
}

/// Members and invitations are sliced independently with the same window,
/// then concatenated for display (members first). A page can therefore show
/// rows from both sub-lists at the same offset.
fn directory_response(snapshot: &DirectorySnapshot, offset: usize) -> DirectoryPageResponse {
    let pager = Pager::with_offset(snapshot.total(), offset);
    let now = chrono::Utc::now().naive_utc();

    let rows = pager
        .slice(&snapshot.members)
        .iter()
        .map(DirectoryRow::Member)
        .chain(
            pager
                .slice(&snapshot.invitations)
                .iter()
                .map(DirectoryRow::Invitation),
        )
        .map(|row| DirectoryRowResponse::from_row(row, now))
        .collect();

    DirectoryPageResponse {
        rows,
        total: snapshot.total(),
        total_pages: pager.total_pages(),
        current_page: pager.current_page(),
        offset: pager.offset(),
        invite_link: snapshot.invite_link.clone(),
    }
}

fn human_date(dt: chrono::NaiveDateTime) -> String {
    dt.format("%b %d, %Y").to_string()
}

async fn get_directory(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(org_id): Path<Uuid>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<impl IntoResponse> {
    if session(&jar, &app_state).is_none() {
        return Err(AppError::NotLoggedIn);
    }

    let snapshot = app_state.directory_use_cases.load_for(org_id).await?;
    Ok(Json(directory_response(
        &snapshot,
        query.offset.unwrap_or(0),
    )))
}

// ============================================================================
// Invitations
// ============================================================================

#[derive(Deserialize)]
struct InvitePayload {
    email: String,
    role: String,
}

/// Role strings arrive over the wire and must match a known role exactly.
fn parse_role(s: &str) -> AppResult<MemberRole> {
    MemberRole::parse(s)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown role: {s}")))
}

#[derive(Serialize)]
struct InviteResponse {
    preview_url: Option<String>,
    directory: DirectoryPageResponse,
}

async fn create_invitation(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<InvitePayload>,
) -> AppResult<impl IntoResponse> {
    // The issuer owns the precondition chain, including "must be logged
    // in", so an absent session is passed through rather than rejected here.
    let session = session(&jar, &app_state);
    let (inviter, plan) = match &session {
        Some((user, plan)) => (Some(user), *plan),
        None => (None, SubscriptionPlan::Free),
    };

    let role = parse_role(&payload.role)?;
    let outcome = app_state
        .invitation_use_cases
        .invite(inviter, Some(org_id), &payload.email, role, plan)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InviteResponse {
            preview_url: outcome.preview_url,
            directory: directory_response(&outcome.directory, 0),
        }),
    ))
}

#[derive(Deserialize)]
struct InvitationPathParams {
    org_id: Uuid,
    invitation_id: Uuid,
}

async fn revoke_invitation(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(params): Path<InvitationPathParams>,
) -> AppResult<impl IntoResponse> {
    if session(&jar, &app_state).is_none() {
        return Err(AppError::NotLoggedIn);
    }

    let snapshot = app_state
        .invitation_use_cases
        .revoke(params.org_id, params.invitation_id)
        .await?;

    Ok(Json(directory_response(&snapshot, 0)))
}

// ============================================================================
// Members
// ============================================================================

#[derive(Deserialize)]
struct MemberPathParams {
    org_id: Uuid,
    member_id: Uuid,
}

#[derive(Deserialize)]
struct UpdateRolePayload {
    role: String,
}

async fn update_member_role(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(params): Path<MemberPathParams>,
    Json(payload): Json<UpdateRolePayload>,
) -> AppResult<impl IntoResponse> {
    if session(&jar, &app_state).is_none() {
        return Err(AppError::NotLoggedIn);
    }

    let role = parse_role(&payload.role)?;
    let snapshot = app_state
        .membership_use_cases
        .update_role(params.org_id, params.member_id, role)
        .await?;

    Ok(Json(directory_response(&snapshot, 0)))
}

#[derive(Deserialize)]
struct RemoveMemberPayload {
    member_id_or_email: String,
    confirmed: bool,
}

#[derive(Serialize)]
struct RemoveMemberResponse {
    removed: bool,
    directory: Option<DirectoryPageResponse>,
}

async fn remove_member(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<RemoveMemberPayload>,
) -> AppResult<impl IntoResponse> {
    if session(&jar, &app_state).is_none() {
        return Err(AppError::NotLoggedIn);
    }

    let member = MemberRef::parse(payload.member_id_or_email.trim());
    let outcome = app_state
        .membership_use_cases
        .remove_member(org_id, member, payload.confirmed)
        .await?;

    let response = match outcome {
        RemovalOutcome::Declined => RemoveMemberResponse {
            removed: false,
            directory: None,
        },
        RemovalOutcome::Removed(snapshot) => RemoveMemberResponse {
            removed: true,
            directory: Some(directory_response(&snapshot, 0)),
        },
    };

    Ok(Json(response))
}
