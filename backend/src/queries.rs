use sqlx::{PgPool, Postgres, QueryBuilder};
use shared::models::*;

pub struct Queries;

impl Queries {
    pub async fn email_taken(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    pub async fn phone_taken(pool: &PgPool, phone: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE phone = $1)")
            .bind(phone)
            .fetch_one(pool)
            .await
    }

    pub async fn insert_client(pool: &PgPool, client: &ClientSchema) -> Result<ClientPublic, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO clients (company, email, phone) VALUES ($1, $2, $3)
             RETURNING id, company, email"
        )
        .bind(&client.company)
        .bind(&client.email)
        .bind(&client.phone)
        .fetch_one(pool)
        .await
    }

    pub async fn list_clients(pool: &PgPool, page: &FilterPage) -> Result<Vec<ClientPublic>, sqlx::Error> {
        sqlx::query_as("SELECT id, company, email FROM clients ORDER BY id OFFSET $1 LIMIT $2")
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(pool)
            .await
    }

    pub async fn get_client(pool: &PgPool, id: i32) -> Result<Option<ClientPublic>, sqlx::Error> {
        sqlx::query_as("SELECT id, company, email FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn client_exists(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn update_client(pool: &PgPool, id: i32, client: &ClientSchema) -> Result<Option<ClientPublic>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE clients SET company = $2, email = $3, phone = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING id, company, email"
        )
        .bind(id)
        .bind(&client.company)
        .bind(&client.email)
        .bind(&client.phone)
        .fetch_optional(pool)
        .await
    }

    /// Projects and their tasks go with the client through `ON DELETE CASCADE`.
    pub async fn delete_client(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn insert_project(pool: &PgPool, client_id: i32, project: &ProjectSchema) -> Result<ProjectPublic, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO projects (title, description, status, client_id) VALUES ($1, $2, $3, $4)
             RETURNING id, title, description, status, created_at, updated_at"
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.status)
        .bind(client_id)
        .fetch_one(pool)
        .await
    }

    pub async fn list_projects(pool: &PgPool, client_id: i32, filter: &ProjectFilter) -> Result<ProjectList, sqlx::Error> {
        let projects = project_list_query(client_id, filter)
            .build_query_as::<ProjectPublic>()
            .fetch_all(pool)
            .await?;

        let total = project_count_query(client_id, filter)
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        Ok(ProjectList { projects, total: Some(total) })
    }

    pub async fn get_project(pool: &PgPool, client_id: i32, id: i32) -> Result<Option<ProjectPublic>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, title, description, status, created_at, updated_at
             FROM projects WHERE id = $1 AND client_id = $2"
        )
        .bind(id)
        .bind(client_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn project_exists(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn update_project(
        pool: &PgPool,
        client_id: i32,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Option<ProjectPublic>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE projects SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1 AND client_id = $2
             RETURNING id, title, description, status, created_at, updated_at"
        )
        .bind(id)
        .bind(client_id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.status)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete_project(pool: &PgPool, client_id: i32, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn insert_task(pool: &PgPool, project_id: i32, task: &TaskSchema) -> Result<TaskPublic, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO tasks (title, description, status, assigned_to, project_id) VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, description, status, assigned_to, created_at, updated_at"
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(&task.assigned_to)
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    pub async fn list_tasks(pool: &PgPool, project_id: i32, filter: &TaskFilter) -> Result<Vec<TaskPublic>, sqlx::Error> {
        task_list_query(project_id, filter)
            .build_query_as::<TaskPublic>()
            .fetch_all(pool)
            .await
    }

    pub async fn get_task(pool: &PgPool, project_id: i32, id: i32) -> Result<Option<TaskPublic>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, title, description, status, assigned_to, created_at, updated_at
             FROM tasks WHERE id = $1 AND project_id = $2"
        )
        .bind(id)
        .bind(project_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update_task(
        pool: &PgPool,
        project_id: i32,
        id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<TaskPublic>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                assigned_to = COALESCE($6, assigned_to),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING id, title, description, status, assigned_to, created_at, updated_at"
        )
        .bind(id)
        .bind(project_id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.status)
        .bind(update.assigned_to.as_deref())
        .fetch_optional(pool)
        .await
    }

    pub async fn delete_task(pool: &PgPool, project_id: i32, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Name of the violated unique constraint, if `e` is one.
pub fn unique_violation(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => Some(db.constraint().unwrap_or_default()),
        _ => None,
    }
}

pub fn project_list_query(client_id: i32, filter: &ProjectFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT id, title, description, status, created_at, updated_at FROM projects"
    );
    push_project_conditions(&mut query, client_id, filter);
    push_page(&mut query, &filter.page);
    query
}

pub fn project_count_query(client_id: i32, filter: &ProjectFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM projects");
    push_project_conditions(&mut query, client_id, filter);
    query
}

pub fn task_list_query(project_id: i32, filter: &TaskFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT id, title, description, status, assigned_to, created_at, updated_at FROM tasks"
    );
    query.push(" WHERE project_id = ").push_bind(project_id);
    push_contains(&mut query, "title", filter.title.as_deref());
    push_contains(&mut query, "description", filter.description.as_deref());
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    push_contains(&mut query, "assigned_to", filter.assigned_to.as_deref());
    push_page(&mut query, &filter.page);
    query
}

fn push_project_conditions(query: &mut QueryBuilder<'static, Postgres>, client_id: i32, filter: &ProjectFilter) {
    query.push(" WHERE client_id = ").push_bind(client_id);
    push_contains(query, "title", filter.title.as_deref());
    push_contains(query, "description", filter.description.as_deref());
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
}

// strpos keeps user input free of LIKE wildcards.
fn push_contains(query: &mut QueryBuilder<'static, Postgres>, column: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        query
            .push(" AND strpos(")
            .push(column)
            .push(", ")
            .push_bind(value.to_string())
            .push(") > 0");
    }
}

fn push_page(query: &mut QueryBuilder<'static, Postgres>, page: &FilterPage) {
    query
        .push(" ORDER BY id OFFSET ")
        .push_bind(page.offset)
        .push(" LIMIT ")
        .push_bind(page.limit);
}
