use crate::error::NudgeError;
use actix_web::HttpRequest;
use nudge_domain::User;
use nudge_infra::{IUserRepo, NudgeContext};

/// Extracts the raw device push token from the `Authorization` header.
/// The token is not a signed credential, possession of it is the whole
/// identity model.
fn get_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Protects routes that require a registered `User`
pub async fn protect_route(req: &HttpRequest, ctx: &NudgeContext) -> Result<User, NudgeError> {
    let token = get_token(req).ok_or_else(|| {
        NudgeError::Unauthorized("Missing `Authorization` header with a device push token".into())
    })?;

    ctx.repos.users.find_by_token(&token).await.ok_or_else(|| {
        NudgeError::Unauthorized("No user is registered for the given device push token".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn rejects_missing_and_empty_token_header() {
        let ctx = NudgeContext::create_inmemory();

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());

        let req = TestRequest::default()
            .insert_header(("Authorization", ""))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::test]
    async fn rejects_unknown_token() {
        let ctx = NudgeContext::create_inmemory();

        let req = TestRequest::default()
            .insert_header(("Authorization", "unknown-token"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::test]
    async fn resolves_user_from_token() {
        let ctx = NudgeContext::create_inmemory();
        let user = User::new("device-token".into());
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let req = TestRequest::default()
            .insert_header(("Authorization", "device-token"))
            .to_http_request();
        let found = protect_route(&req, &ctx).await.expect("To resolve user");
        assert_eq!(found.id, user.id);
    }
}
