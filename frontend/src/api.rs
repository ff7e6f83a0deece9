//! Typed calls against the backend, all issued through the registered client.

use shared::models::*;
use crate::http_client::{ClientError, HttpClient};

pub type ApiResult<T> = Result<T, ClientError>;

fn client_path(client_id: i32) -> String {
    format!("clients/{}", client_id)
}

fn project_path(client_id: i32, project_id: i32) -> String {
    format!("clients/{}/projects/{}", client_id, project_id)
}

fn task_path(project_id: i32, task_id: i32) -> String {
    format!("projects/{}/tasks/{}", project_id, task_id)
}

pub async fn read_root(client: &HttpClient) -> ApiResult<Message> {
    client.get("").await
}

pub async fn list_clients(client: &HttpClient, page: &FilterPage) -> ApiResult<ClientList> {
    client.get(&with_query("clients", &page.to_query())).await
}

pub async fn read_client(client: &HttpClient, client_id: i32) -> ApiResult<ClientPublic> {
    client.get(&client_path(client_id)).await
}

pub async fn create_client(client: &HttpClient, schema: &ClientSchema) -> ApiResult<ClientPublic> {
    client.post("clients", schema).await
}

pub async fn patch_client(client: &HttpClient, client_id: i32, schema: &ClientSchema) -> ApiResult<ClientPublic> {
    client.patch(&client_path(client_id), schema).await
}

pub async fn delete_client(client: &HttpClient, client_id: i32) -> ApiResult<Message> {
    client.delete(&client_path(client_id)).await
}

pub async fn list_projects(client: &HttpClient, client_id: i32, filter: &ProjectFilter) -> ApiResult<ProjectList> {
    let path = format!("clients/{}/projects", client_id);
    client.get(&with_query(&path, &filter.to_query())).await
}

pub async fn read_project(client: &HttpClient, client_id: i32, project_id: i32) -> ApiResult<ProjectPublic> {
    client.get(&project_path(client_id, project_id)).await
}

pub async fn create_project(client: &HttpClient, client_id: i32, schema: &ProjectSchema) -> ApiResult<ProjectPublic> {
    client.post(&format!("clients/{}/projects", client_id), schema).await
}

pub async fn patch_project(
    client: &HttpClient,
    client_id: i32,
    project_id: i32,
    update: &ProjectUpdate,
) -> ApiResult<ProjectPublic> {
    client.patch(&project_path(client_id, project_id), update).await
}

pub async fn delete_project(client: &HttpClient, client_id: i32, project_id: i32) -> ApiResult<Message> {
    client.delete(&project_path(client_id, project_id)).await
}

pub async fn list_tasks(client: &HttpClient, project_id: i32, filter: &TaskFilter) -> ApiResult<TaskList> {
    let path = format!("projects/{}/tasks", project_id);
    client.get(&with_query(&path, &filter.to_query())).await
}

pub async fn read_task(client: &HttpClient, project_id: i32, task_id: i32) -> ApiResult<TaskPublic> {
    client.get(&task_path(project_id, task_id)).await
}

pub async fn create_task(client: &HttpClient, project_id: i32, schema: &TaskSchema) -> ApiResult<TaskPublic> {
    client.post(&format!("projects/{}/tasks", project_id), schema).await
}

pub async fn patch_task(
    client: &HttpClient,
    project_id: i32,
    task_id: i32,
    update: &TaskUpdate,
) -> ApiResult<TaskPublic> {
    client.patch(&task_path(project_id, task_id), update).await
}

pub async fn delete_task(client: &HttpClient, project_id: i32, task_id: i32) -> ApiResult<Message> {
    client.delete(&task_path(project_id, task_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_paths() {
        assert_eq!(client_path(7), "clients/7");
        assert_eq!(project_path(1, 2), "clients/1/projects/2");
        assert_eq!(task_path(2, 9), "projects/2/tasks/9");
    }
}
