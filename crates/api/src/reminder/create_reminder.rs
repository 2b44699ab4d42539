use crate::error::NudgeError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::create_reminder::*;
use nudge_api_structs::dtos::DueDateDTO;
use nudge_domain::{parse_due_date, Reminder, ID};
use nudge_infra::{IReminderRepo, IUserRepo, NudgeContext};

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: user.id,
        title: body.title,
        date: body.date,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.reminder)))
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub title: String,
    pub date: DueDateDTO,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidDate(String),
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("A title is required".into()),
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date: {}. Expected unix millis or an RFC 3339 timestamp",
                date
            )),
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        let remind_at = match &self.date {
            DueDateDTO::Millis(millis) => *millis,
            DueDateDTO::Timestamp(datestr) => parse_due_date(datestr)
                .map_err(|_| UseCaseError::InvalidDate(datestr.clone()))?,
        };

        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let reminder = Reminder::new(self.user_id.clone(), title.to_string(), remind_at);
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| UseCaseRes { reminder })
            .map_err(|_| UseCaseError::StorageError)
    }
}
