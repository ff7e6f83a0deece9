use crate::models::{ClientSchema, FilterPage, ProjectSchema, ProjectUpdate, TaskSchema, TaskUpdate};

pub const MAX_COMPANY_LENGTH: usize = 120;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_PHONE_LENGTH: usize = 32;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MAX_ASSIGNEE_LENGTH: usize = 120;
pub const MAX_PAGE_LIMIT: i64 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} exceeds maximum length of {1}")]
    TooLong(&'static str, usize),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("offset must not be negative")]
    NegativeOffset,
    #[error("limit must be between 0 and {MAX_PAGE_LIMIT}")]
    InvalidLimit,
}

fn require(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() { return Err(ValidationError::Required(field)); }
    if value.chars().count() > max { return Err(ValidationError::TooLong(field, max)); }
    Ok(())
}

fn optional(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| require(field, v, max))
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(email.to_string());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let labels_ok = domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty());
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_client(client: &ClientSchema) -> Result<(), ValidationError> {
    require("company", &client.company, MAX_COMPANY_LENGTH)?;
    require("email", &client.email, MAX_EMAIL_LENGTH)?;
    validate_email(&client.email)?;
    require("phone", &client.phone, MAX_PHONE_LENGTH)
}

pub fn validate_project(project: &ProjectSchema) -> Result<(), ValidationError> {
    require("title", &project.title, MAX_TITLE_LENGTH)?;
    require("description", &project.description, MAX_DESCRIPTION_LENGTH)
}

pub fn validate_project_update(update: &ProjectUpdate) -> Result<(), ValidationError> {
    optional("title", update.title.as_deref(), MAX_TITLE_LENGTH)?;
    optional("description", update.description.as_deref(), MAX_DESCRIPTION_LENGTH)
}

pub fn validate_task(task: &TaskSchema) -> Result<(), ValidationError> {
    require("title", &task.title, MAX_TITLE_LENGTH)?;
    require("description", &task.description, MAX_DESCRIPTION_LENGTH)?;
    require("assigned_to", &task.assigned_to, MAX_ASSIGNEE_LENGTH)
}

pub fn validate_task_update(update: &TaskUpdate) -> Result<(), ValidationError> {
    optional("title", update.title.as_deref(), MAX_TITLE_LENGTH)?;
    optional("description", update.description.as_deref(), MAX_DESCRIPTION_LENGTH)?;
    optional("assigned_to", update.assigned_to.as_deref(), MAX_ASSIGNEE_LENGTH)
}

pub fn validate_page(page: &FilterPage) -> Result<(), ValidationError> {
    if page.offset < 0 { return Err(ValidationError::NegativeOffset); }
    if page.limit < 0 || page.limit > MAX_PAGE_LIMIT { return Err(ValidationError::InvalidLimit); }
    Ok(())
}
