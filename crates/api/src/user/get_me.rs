use crate::{error::NudgeError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::get_me::*;
use nudge_infra::NudgeContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
