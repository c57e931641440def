use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::teams::{
    CreateTeamInterface, GetTeamInterface, MassDeactivateTeamUsersInterface,
};
use reviewbot_models::{Team, User};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;
use tracing::info;

use super::{required, with_timeout};
use crate::{metrics::USERS_DEACTIVATED, server::AppContext, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateTeamJson {
    name: String,
}

#[derive(Debug, Serialize)]
struct TeamJson {
    #[serde(flatten)]
    team: Team,
    members: Vec<User>,
}

pub(crate) async fn create_team(
    ctx: web::Data<AppContext>,
    body: web::Json<CreateTeamJson>,
) -> Result<HttpResponse> {
    let name = required("name", &body.name)?;

    let core_ctx = ctx.as_core_context();
    let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
    let team = with_timeout(&ctx, create_team.run(&core_ctx, name)).await?;

    Ok(HttpResponse::Created().json(team))
}

pub(crate) async fn get_team(
    ctx: web::Data<AppContext>,
    name: web::Path<String>,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let found = with_timeout(&ctx, get_team.run(&core_ctx, &name)).await?;

    Ok(HttpResponse::Ok().json(TeamJson {
        team: found.team,
        members: found.members,
    }))
}

pub(crate) async fn deactivate_team(
    ctx: web::Data<AppContext>,
    team_id: web::Path<u64>,
) -> Result<HttpResponse> {
    let team_id = team_id.into_inner();

    let core_ctx = ctx.as_core_context();
    let mass_deactivate: &dyn MassDeactivateTeamUsersInterface = ctx.core_module.resolve_ref();
    let users = with_timeout(&ctx, mass_deactivate.run(&core_ctx, team_id)).await?;

    USERS_DEACTIVATED.inc_by(users.len() as u64);
    info!(team_id = team_id, users = users.len(), message = "Team deactivated");

    Ok(HttpResponse::NoContent().finish())
}
