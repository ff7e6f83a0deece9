use rocket::{FromForm, State, get, post, patch, delete, http::Status, response::status::Created, serde::json::Json};
use tracing::{info, debug, warn, instrument};
use sqlx::PgPool;
use shared::{models::*, validation::*};
use crate::{
    error::ApiError,
    queries::{Queries, unique_violation},
};

const CLIENT_NOT_FOUND: &str = "Client not found";
const PROJECT_NOT_FOUND: &str = "Project not found";
const TASK_NOT_FOUND: &str = "Task not found";

pub struct AppState {
    pub db: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { db: pool }
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// `offset`/`limit` query fields. A value that is not an integer fails the
/// guard and ends in the 422 catcher; range rules are checked afterwards.
#[derive(Debug, FromForm)]
pub struct PageQuery {
    #[field(default = DEFAULT_OFFSET)]
    pub offset: i64,
    #[field(default = DEFAULT_LIMIT)]
    pub limit: i64,
}

impl PageQuery {
    fn validated(self) -> ApiResult<FilterPage> {
        let page = FilterPage { offset: self.offset, limit: self.limit };
        validate_page(&page)?;
        Ok(page)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_status<T: std::str::FromStr<Err = shared::Error>>(status: Option<String>) -> ApiResult<Option<T>> {
    Ok(non_empty(status).map(|s| s.parse()).transpose()?)
}

async fn ensure_client(db: &PgPool, client_id: i32) -> ApiResult<()> {
    if Queries::client_exists(db, client_id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(CLIENT_NOT_FOUND))
    }
}

async fn ensure_project(db: &PgPool, project_id: i32) -> ApiResult<()> {
    if Queries::project_exists(db, project_id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(PROJECT_NOT_FOUND))
    }
}

fn duplicate_client(e: sqlx::Error) -> ApiError {
    match unique_violation(&e) {
        Some(constraint) if constraint.contains("email") => ApiError::BadRequest("Email already exists".into()),
        Some(constraint) if constraint.contains("phone") => ApiError::BadRequest("Phone already exists".into()),
        Some(_) => ApiError::BadRequest("Company already exists".into()),
        None => e.into(),
    }
}

#[get("/")]
pub fn index() -> Json<Message> {
    Json(Message::new("Hello World!"))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[instrument(skip(state, client))]
#[post("/clients", format = "json", data = "<client>")]
pub async fn create_client(
    state: &State<AppState>,
    client: Json<ClientSchema>,
) -> ApiResult<Created<Json<ClientPublic>>> {
    let client = client.into_inner();
    validate_client(&client)?;

    if Queries::email_taken(&state.db, &client.email).await? {
        return Err(ApiError::BadRequest("Email already exists".into()));
    }
    if Queries::phone_taken(&state.db, &client.phone).await? {
        return Err(ApiError::BadRequest("Phone already exists".into()));
    }

    let created = Queries::insert_client(&state.db, &client)
        .await
        .map_err(duplicate_client)?;

    info!(client_id = created.id, "Client created");
    Ok(Created::new(format!("/clients/{}", created.id)).body(Json(created)))
}

#[get("/clients?<page..>")]
pub async fn read_clients(state: &State<AppState>, page: PageQuery) -> ApiResult<Json<ClientList>> {
    let page = page.validated()?;
    let clients = Queries::list_clients(&state.db, &page).await?;
    debug!("Listed {} clients", clients.len());
    Ok(Json(ClientList { clients }))
}

#[get("/clients/<client_id>")]
pub async fn read_client(state: &State<AppState>, client_id: i32) -> ApiResult<Json<ClientPublic>> {
    Queries::get_client(&state.db, client_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(CLIENT_NOT_FOUND))
}

#[instrument(skip(state, client))]
#[patch("/clients/<client_id>", format = "json", data = "<client>")]
pub async fn patch_client(
    state: &State<AppState>,
    client_id: i32,
    client: Json<ClientSchema>,
) -> ApiResult<Json<ClientPublic>> {
    let client = client.into_inner();
    validate_client(&client)?;
    ensure_client(&state.db, client_id).await?;

    let updated = Queries::update_client(&state.db, client_id, &client)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(_) => {
                warn!("Client {} update hit a unique constraint", client_id);
                ApiError::Conflict("Email or Phone already exists".into())
            }
            None => e.into(),
        })?;

    updated.map(Json).ok_or(ApiError::NotFound(CLIENT_NOT_FOUND))
}

#[instrument(skip(state))]
#[delete("/clients/<client_id>")]
pub async fn delete_client(state: &State<AppState>, client_id: i32) -> ApiResult<Json<Message>> {
    if !Queries::delete_client(&state.db, client_id).await? {
        return Err(ApiError::NotFound(CLIENT_NOT_FOUND));
    }
    info!("Client deleted");
    Ok(Json(Message::new("Client deleted!")))
}

#[instrument(skip(state, project))]
#[post("/clients/<client_id>/projects", format = "json", data = "<project>")]
pub async fn create_project(
    state: &State<AppState>,
    client_id: i32,
    project: Json<ProjectSchema>,
) -> ApiResult<Created<Json<ProjectPublic>>> {
    let project = project.into_inner();
    validate_project(&project)?;
    ensure_client(&state.db, client_id).await?;

    let created = Queries::insert_project(&state.db, client_id, &project).await?;
    info!(project_id = created.id, "Project created");
    Ok(Created::new(format!("/clients/{}/projects/{}", client_id, created.id)).body(Json(created)))
}

#[get("/clients/<client_id>/projects?<title>&<description>&<status>&<page..>")]
pub async fn read_projects(
    state: &State<AppState>,
    client_id: i32,
    page: PageQuery,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
) -> ApiResult<Json<ProjectList>> {
    let filter = ProjectFilter {
        page: page.validated()?,
        title: non_empty(title),
        description: non_empty(description),
        status: parse_status(status)?,
    };
    ensure_client(&state.db, client_id).await?;

    let list = Queries::list_projects(&state.db, client_id, &filter).await?;
    debug!("Listed {} of {:?} projects for client {}", list.projects.len(), list.total, client_id);
    Ok(Json(list))
}

#[get("/clients/<client_id>/projects/<project_id>")]
pub async fn read_project(
    state: &State<AppState>,
    client_id: i32,
    project_id: i32,
) -> ApiResult<Json<ProjectPublic>> {
    ensure_client(&state.db, client_id).await?;
    Queries::get_project(&state.db, client_id, project_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(PROJECT_NOT_FOUND))
}

#[instrument(skip(state, project))]
#[patch("/clients/<client_id>/projects/<project_id>", format = "json", data = "<project>")]
pub async fn patch_project(
    state: &State<AppState>,
    client_id: i32,
    project_id: i32,
    project: Json<ProjectUpdate>,
) -> ApiResult<Json<ProjectPublic>> {
    let update = project.into_inner();
    validate_project_update(&update)?;
    ensure_client(&state.db, client_id).await?;

    Queries::update_project(&state.db, client_id, project_id, &update)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(PROJECT_NOT_FOUND))
}

#[instrument(skip(state))]
#[delete("/clients/<client_id>/projects/<project_id>")]
pub async fn delete_project(
    state: &State<AppState>,
    client_id: i32,
    project_id: i32,
) -> ApiResult<Json<Message>> {
    ensure_client(&state.db, client_id).await?;
    if !Queries::delete_project(&state.db, client_id, project_id).await? {
        return Err(ApiError::NotFound(PROJECT_NOT_FOUND));
    }
    info!("Project deleted");
    Ok(Json(Message::new("Project deleted successfully")))
}

#[instrument(skip(state, task))]
#[post("/projects/<project_id>/tasks", format = "json", data = "<task>")]
pub async fn create_task(
    state: &State<AppState>,
    project_id: i32,
    task: Json<TaskSchema>,
) -> ApiResult<Created<Json<TaskPublic>>> {
    let task = task.into_inner();
    validate_task(&task)?;
    ensure_project(&state.db, project_id).await?;

    let created = Queries::insert_task(&state.db, project_id, &task).await?;
    info!(task_id = created.id, "Task created");
    Ok(Created::new(format!("/projects/{}/tasks/{}", project_id, created.id)).body(Json(created)))
}

#[get("/projects/<project_id>/tasks?<title>&<description>&<status>&<assigned_to>&<page..>")]
pub async fn read_tasks(
    state: &State<AppState>,
    project_id: i32,
    page: PageQuery,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    assigned_to: Option<String>,
) -> ApiResult<Json<TaskList>> {
    let filter = TaskFilter {
        page: page.validated()?,
        title: non_empty(title),
        description: non_empty(description),
        status: parse_status(status)?,
        assigned_to: non_empty(assigned_to),
    };
    ensure_project(&state.db, project_id).await?;

    let tasks = Queries::list_tasks(&state.db, project_id, &filter).await?;
    debug!("Listed {} tasks for project {}", tasks.len(), project_id);
    Ok(Json(TaskList { tasks }))
}

#[get("/projects/<project_id>/tasks/<task_id>")]
pub async fn read_task(
    state: &State<AppState>,
    project_id: i32,
    task_id: i32,
) -> ApiResult<Json<TaskPublic>> {
    ensure_project(&state.db, project_id).await?;
    Queries::get_task(&state.db, project_id, task_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(TASK_NOT_FOUND))
}

#[instrument(skip(state, task))]
#[patch("/projects/<project_id>/tasks/<task_id>", format = "json", data = "<task>")]
pub async fn patch_task(
    state: &State<AppState>,
    project_id: i32,
    task_id: i32,
    task: Json<TaskUpdate>,
) -> ApiResult<Json<TaskPublic>> {
    let update = task.into_inner();
    validate_task_update(&update)?;
    ensure_project(&state.db, project_id).await?;

    Queries::update_task(&state.db, project_id, task_id, &update)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(TASK_NOT_FOUND))
}

#[instrument(skip(state))]
#[delete("/projects/<project_id>/tasks/<task_id>")]
pub async fn delete_task(
    state: &State<AppState>,
    project_id: i32,
    task_id: i32,
) -> ApiResult<Json<Message>> {
    ensure_project(&state.db, project_id).await?;
    if !Queries::delete_task(&state.db, project_id, task_id).await? {
        return Err(ApiError::NotFound(TASK_NOT_FOUND));
    }
    info!("Task deleted");
    Ok(Json(Message::new("Task deleted successfully")))
}
