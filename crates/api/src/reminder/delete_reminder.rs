use crate::error::NudgeError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::delete_reminder::*;
use nudge_domain::{Reminder, ID};
use nudge_infra::{IReminderRepo, NudgeContext};

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::NoContent().finish())
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        // Ownership is part of the delete condition so a reminder owned
        // by someone else is indistinguishable from a missing one
        ctx.repos
            .reminders
            .delete_for_user(&self.reminder_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_domain::User;
    use nudge_infra::IUserRepo;

    #[actix_web::test]
    async fn non_owner_delete_is_not_found() {
        let ctx = NudgeContext::create_inmemory();

        let owner = User::new("owner-token".into());
        let other = User::new("other-token".into());
        ctx.repos.users.insert(&owner).await.unwrap();
        ctx.repos.users.insert(&other).await.unwrap();

        let reminder = Reminder::new(owner.id.clone(), "Buy milk".into(), 100);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            user_id: other.id,
            reminder_id: reminder.id.clone(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));

        // Still intact for the owner
        assert_eq!(ctx.repos.reminders.find_by_user(&owner.id).await.len(), 1);

        let usecase = DeleteReminderUseCase {
            user_id: owner.id.clone(),
            reminder_id: reminder.id,
        };
        execute(usecase, &ctx).await.expect("To delete reminder");
        assert!(ctx.repos.reminders.find_by_user(&owner.id).await.is_empty());
    }
}
