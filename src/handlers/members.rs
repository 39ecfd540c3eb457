use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AddressDto, AppState, CreatedResponse, PageResponse};
use crate::domain::member::{MemberTeamView, MemberView, NewMember};
use crate::domain::page::{MemberSort, PageRequest};
use crate::domain::search::MemberSearchCondition;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub address: AddressDto,
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMemberRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub address: AddressDto,
    pub team_id: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MemberView> for MemberResponse {
    fn from(m: MemberView) -> Self {
        MemberResponse {
            id: m.id,
            name: m.name,
            age: m.age,
            address: m.address.into(),
            team_id: m.team_id,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberTeamResponse {
    pub member_id: Uuid,
    pub name: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

impl From<MemberTeamView> for MemberTeamResponse {
    fn from(v: MemberTeamView) -> Self {
        MemberTeamResponse {
            member_id: v.member_id,
            name: v.name,
            age: v.age,
            team_id: v.team_id,
            team_name: v.team_name,
        }
    }
}

/// Search filters plus optional paging. Unset or blank filters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MemberSearchParams {
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

fn default_size() -> i64 {
    20
}

impl MemberSearchParams {
    fn condition(&self) -> MemberSearchCondition {
        MemberSearchCondition {
            name: self.name.clone(),
            team_name: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }

    fn page_request(&self) -> Result<PageRequest, AppError> {
        let mut sort = MemberSort::default();
        if let Some(key) = self.sort.as_deref() {
            sort.key = key.parse()?;
        }
        if let Some(direction) = self.direction.as_deref() {
            sort.direction = direction.parse()?;
        }
        Ok(PageRequest::new(self.page, self.size, sort)?)
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /teams
#[utoipa::path(
    post,
    path = "/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = CreatedResponse),
        (status = 400, description = "Blank team name"),
    ),
    tag = "members"
)]
pub async fn create_team(
    state: web::Data<AppState>,
    body: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = web::block(move || state.members.create_team(&body.name)).await??;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// POST /members
///
/// Registers a member. Names are unique.
#[utoipa::path(
    post,
    path = "/members",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Member created", body = CreatedResponse),
        (status = 400, description = "Blank name or unknown team"),
        (status = 409, description = "Name already taken"),
    ),
    tag = "members"
)]
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let member = NewMember {
        name: body.name,
        age: body.age,
        address: body.address.into(),
        team_id: body.team_id,
    };
    let id = web::block(move || state.members.sign_up(member)).await??;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /members
#[utoipa::path(
    get,
    path = "/members",
    responses(
        (status = 200, description = "All members", body = Vec<MemberResponse>),
    ),
    tag = "members"
)]
pub async fn list_members(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let members = web::block(move || state.members.find_members()).await??;
    let body: Vec<MemberResponse> = members.into_iter().map(MemberResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /members/{id}
#[utoipa::path(
    get,
    path = "/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member UUID"),
    ),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found"),
    ),
    tag = "members"
)]
pub async fn get_member(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let member = web::block(move || state.members.find_member(id)).await??;
    Ok(HttpResponse::Ok().json(MemberResponse::from(member)))
}

/// PUT /members/{id}
///
/// Renames a member and returns the updated record.
#[utoipa::path(
    put,
    path = "/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member UUID"),
    ),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Blank name"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Name already taken"),
    ),
    tag = "members"
)]
pub async fn update_member(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let member = web::block(move || state.members.update_name(id, &body.name)).await??;
    Ok(HttpResponse::Ok().json(MemberResponse::from(member)))
}

/// GET /members/search
///
/// Unpaged search. Every filter is optional.
#[utoipa::path(
    get,
    path = "/members/search",
    params(
        ("name" = Option<String>, Query, description = "Exact member name"),
        ("team_name" = Option<String>, Query, description = "Exact team name"),
        ("age_goe" = Option<i32>, Query, description = "Minimum age, inclusive"),
        ("age_loe" = Option<i32>, Query, description = "Maximum age, inclusive"),
    ),
    responses(
        (status = 200, description = "Matching members", body = Vec<MemberTeamResponse>),
    ),
    tag = "members"
)]
pub async fn search_members(
    state: web::Data<AppState>,
    query: web::Query<MemberSearchParams>,
) -> Result<HttpResponse, AppError> {
    let condition = query.into_inner().condition();
    let rows = web::block(move || state.member_search.search(&condition)).await??;
    let body: Vec<MemberTeamResponse> = rows.into_iter().map(MemberTeamResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /members/search/simple
///
/// Paged search that always runs the count query.
#[utoipa::path(
    get,
    path = "/members/search/simple",
    params(
        ("name" = Option<String>, Query, description = "Exact member name"),
        ("team_name" = Option<String>, Query, description = "Exact team name"),
        ("age_goe" = Option<i32>, Query, description = "Minimum age, inclusive"),
        ("age_loe" = Option<i32>, Query, description = "Maximum age, inclusive"),
        ("page" = Option<i64>, Query, description = "Zero-based page index (default 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default 20, max 2000)"),
        ("sort" = Option<String>, Query, description = "name, age or team_name"),
        ("direction" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "One page of matching members", body = PageResponse<MemberTeamResponse>),
        (status = 400, description = "Invalid paging parameters"),
    ),
    tag = "members"
)]
pub async fn search_members_page_simple(
    state: web::Data<AppState>,
    query: web::Query<MemberSearchParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let request = params.page_request()?;
    let condition = params.condition();
    let page =
        web::block(move || state.member_search.search_page_simple(&condition, &request)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from(page.map(MemberTeamResponse::from))))
}

/// GET /members/search/page
///
/// Paged search that skips the count query when the page content already
/// determines the total.
#[utoipa::path(
    get,
    path = "/members/search/page",
    params(
        ("name" = Option<String>, Query, description = "Exact member name"),
        ("team_name" = Option<String>, Query, description = "Exact team name"),
        ("age_goe" = Option<i32>, Query, description = "Minimum age, inclusive"),
        ("age_loe" = Option<i32>, Query, description = "Maximum age, inclusive"),
        ("page" = Option<i64>, Query, description = "Zero-based page index (default 0)"),
        ("size" = Option<i64>, Query, description = "Page size (default 20, max 2000)"),
        ("sort" = Option<String>, Query, description = "name, age or team_name"),
        ("direction" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "One page of matching members", body = PageResponse<MemberTeamResponse>),
        (status = 400, description = "Invalid paging parameters"),
    ),
    tag = "members"
)]
pub async fn search_members_page(
    state: web::Data<AppState>,
    query: web::Query<MemberSearchParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let request = params.page_request()?;
    let condition = params.condition();
    let page = web::block(move || state.member_search.search_page(&condition, &request)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from(page.map(MemberTeamResponse::from))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::{MemberSortKey, SortDirection};

    #[test]
    fn page_request_defaults_to_first_page_by_name() {
        let params: MemberSearchParams = serde_json::from_str("{}").unwrap();
        let request = params.page_request().unwrap();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 20);
        assert_eq!(request.sort(), MemberSort::default());
    }

    #[test]
    fn page_request_parses_sort_and_direction() {
        let params = MemberSearchParams {
            page: 2,
            size: 5,
            sort: Some("team_name".to_string()),
            direction: Some("DESC".to_string()),
            ..Default::default()
        };
        let request = params.page_request().unwrap();
        assert_eq!(request.offset(), 10);
        assert_eq!(request.sort().key, MemberSortKey::TeamName);
        assert_eq!(request.sort().direction, SortDirection::Desc);
    }

    #[test]
    fn unknown_sort_key_is_a_bad_request() {
        let params = MemberSearchParams {
            size: 20,
            sort: Some("salary".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.page_request(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn zero_size_is_a_bad_request() {
        let params = MemberSearchParams::default();
        assert!(matches!(params.page_request(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn out_of_range_paging_is_a_bad_request() {
        let huge_size: MemberSearchParams =
            serde_json::from_str(&format!(r#"{{"size":{}}}"#, i64::MAX)).unwrap();
        assert!(matches!(huge_size.page_request(), Err(AppError::BadRequest(_))));

        let overflowing_page = MemberSearchParams {
            page: i64::MAX / 2,
            size: 3,
            ..Default::default()
        };
        assert!(matches!(
            overflowing_page.page_request(),
            Err(AppError::BadRequest(_))
        ));

        let largest = MemberSearchParams {
            size: crate::domain::page::MAX_PAGE_SIZE,
            ..Default::default()
        };
        assert!(largest.page_request().is_ok());
    }

    #[test]
    fn condition_copies_every_filter() {
        let params = MemberSearchParams {
            name: Some("member1".to_string()),
            team_name: Some("teamA".to_string()),
            age_goe: Some(10),
            age_loe: Some(20),
            ..Default::default()
        };
        let condition = params.condition();
        assert_eq!(condition.name.as_deref(), Some("member1"));
        assert_eq!(condition.team_name.as_deref(), Some("teamA"));
        assert_eq!(condition.age_goe, Some(10));
        assert_eq!(condition.age_loe, Some(20));
    }
}
