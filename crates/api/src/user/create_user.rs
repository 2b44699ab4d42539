use crate::error::NudgeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use nudge_api_structs::create_user::*;
use nudge_domain::User;
use nudge_infra::{IUserRepo, NudgeContext};

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let usecase = CreateUserUseCase {
        token: body.0.token,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.user)))
        .map_err(NudgeError::from)
}

/// Resolves the `User` for a device push token, creating one on first
/// contact. Registering the same token again returns the existing
/// `User`, never a second identity.
#[derive(Debug)]
pub struct CreateUserUseCase {
    pub token: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyToken,
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyToken => {
                Self::BadClientData("A device push token is required".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(UseCaseError::EmptyToken);
        }

        if let Some(user) = ctx.repos.users.find_by_token(token).await {
            return Ok(UseCaseRes { user });
        }

        let user = User::new(token.to_string());
        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(UseCaseRes { user }),
            // The insert can only be rejected when another request for the
            // same token won the first-contact race, so the user must
            // exist now
            Err(_) => ctx
                .repos
                .users
                .find_by_token(token)
                .await
                .map(|user| UseCaseRes { user })
                .ok_or(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;

    #[actix_web::test]
    async fn rejects_empty_token() {
        let ctx = NudgeContext::create_inmemory();

        for token in &["", "   "] {
            let usecase = CreateUserUseCase {
                token: (*token).into(),
            };
            assert!(execute(usecase, &ctx).await.is_err());
        }
    }

    #[actix_web::test]
    async fn registering_a_token_twice_returns_the_same_user() {
        let ctx = NudgeContext::create_inmemory();

        let first = execute(
            CreateUserUseCase {
                token: "device-token".into(),
            },
            &ctx,
        )
        .await
        .expect("To create user");
        let second = execute(
            CreateUserUseCase {
                token: "device-token".into(),
            },
            &ctx,
        )
        .await
        .expect("To resolve user");

        assert_eq!(first.user.id, second.user.id);
    }

    #[actix_web::test]
    async fn concurrent_first_contact_creates_exactly_one_user() {
        let ctx = NudgeContext::create_inmemory();

        let requests = (0..20).map(|_| {
            execute(
                CreateUserUseCase {
                    token: "device-token".into(),
                },
                &ctx,
            )
        });
        let results = join_all(requests).await;

        let mut user_ids = results
            .into_iter()
            .map(|res| res.expect("To resolve user").user.id)
            .collect::<Vec<_>>();
        user_ids.dedup();
        assert_eq!(user_ids.len(), 1);
    }
}
