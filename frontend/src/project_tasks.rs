use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;
use std::rc::Rc;
use time::format_description::well_known::Rfc3339;
use shared::{models::*, validation::validate_task};
use crate::{Route, api, plugin::use_http_client, styles::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub client_id: i32,
    pub project_id: i32,
}

#[derive(Clone, Default, PartialEq)]
pub struct TasksState {
    project: Option<ProjectPublic>,
    tasks: Vec<TaskPublic>,
    error: Option<String>,
    not_found: Option<String>,
}

pub enum Msg {
    ProjectLoaded(ProjectPublic),
    TasksLoaded(Vec<TaskPublic>),
    Saved(TaskPublic),
    Deleted(i32),
    NotFound(String),
    Error(String),
}

impl Reducible for TasksState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::ProjectLoaded(project) => next.project = Some(project),
            Msg::TasksLoaded(tasks) => {
                next.tasks = tasks;
                next.error = None;
            },
            Msg::Saved(task) => {
                match next.tasks.iter_mut().find(|t| t.id == task.id) {
                    Some(existing) => *existing = task,
                    None => next.tasks.push(task),
                }
                next.error = None;
            },
            Msg::Deleted(id) => next.tasks.retain(|t| t.id != id),
            Msg::NotFound(detail) => next.not_found = Some(detail),
            Msg::Error(error) => next.error = Some(error),
        }
        Rc::new(next)
    }
}

#[function_component]
pub fn ProjectTasks(props: &Props) -> Html {
    let client = use_http_client();
    let state = use_reducer(TasksState::default);
    let client_id = props.client_id;
    let project_id = props.project_id;

    {
        let client = client.clone();
        let state = state.clone();
        use_effect_with_deps(move |&(client_id, project_id)| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::read_project(&client, client_id, project_id).await {
                    Ok(project) => state.dispatch(Msg::ProjectLoaded(project)),
                    Err(e) if e.is_not_found() => {
                        state.dispatch(Msg::NotFound(e.to_string()));
                        return;
                    }
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }

                match api::list_tasks(&client, project_id, &TaskFilter::default()).await {
                    Ok(list) => state.dispatch(Msg::TasksLoaded(list.tasks)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
            || ()
        }, (client_id, project_id));
    }

    if let Some(detail) = &state.not_found {
        return html! {
            <div class={CONTAINER}>
                <div class={alert_style("error")}>{detail}</div>
                <Link<Route> to={Route::ClientProjects { client_id }} classes="text-blue-400 hover:underline">
                    {"Back to projects"}
                </Link<Route>>
            </div>
        };
    }

    let on_status = {
        let client = client.clone();
        let state = state.clone();
        Callback::from(move |(task_id, status): (i32, TaskStatus)| {
            let client = client.clone();
            let state = state.clone();
            let update = TaskUpdate { status: Some(status), ..Default::default() };
            wasm_bindgen_futures::spawn_local(async move {
                match api::patch_task(&client, project_id, task_id, &update).await {
                    Ok(task) => state.dispatch(Msg::Saved(task)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        let state = state.clone();
        Callback::from(move |task_id: i32| {
            let client = client.clone();
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_task(&client, project_id, task_id).await {
                    Ok(_) => state.dispatch(Msg::Deleted(task_id)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
        })
    };

    let on_refresh = {
        let client = client.clone();
        let state = state.clone();
        Callback::from(move |task_id: i32| {
            let client = client.clone();
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::read_task(&client, project_id, task_id).await {
                    Ok(task) => state.dispatch(Msg::Saved(task)),
                    Err(e) if e.is_not_found() => state.dispatch(Msg::Deleted(task_id)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
        })
    };

    let on_created = {
        let state = state.clone();
        Callback::from(move |task: TaskPublic| state.dispatch(Msg::Saved(task)))
    };

    html! {
        <div class={CONTAINER}>
            {match &state.project {
                Some(project) => html! {
                    <>
                        <h1 class={combine_classes(HEADING_LG, "text-white")}>{&project.title}</h1>
                        <p class={combine_classes(TEXT_MUTED, "text-center mb-6")}>{&project.description}</p>
                    </>
                },
                None => html! {
                    <div class={combine_classes("animate-pulse text-center mb-6", TEXT_MUTED)}>{"Loading project..."}</div>
                },
            }}

            {if let Some(error) = &state.error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            <div class={combine_classes(SPACE_Y_BASE, "mb-8")}>
                {state.tasks.iter().map(|task| {
                    let id = task.id;
                    let onchange = on_status.reform(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        (id, select.value().parse().unwrap_or(TaskStatus::Pending))
                    });
                    let ondelete = on_delete.reform(move |_: MouseEvent| id);
                    let onrefresh = on_refresh.reform(move |_: MouseEvent| id);
                    html! {
                        <div class={CARD_SECTION} key={id}>
                            <div class={FLEX_BETWEEN}>
                                <h3 class="text-lg font-semibold text-gray-100">{&task.title}</h3>
                                <span class={status_badge(task.status.as_str())}>{task.status.as_str()}</span>
                            </div>
                            <p class={combine_classes(TEXT_MUTED, "my-2")}>{&task.description}</p>
                            <div class={FLEX_BETWEEN}>
                                <span class={TEXT_MUTED}>
                                    {format!("{} · updated {}", task.assigned_to, format_timestamp(task.updated_at))}
                                </span>
                                <div class="flex gap-2">
                                    <select class="bg-gray-700 text-white rounded-md px-2" {onchange}>
                                        {for TaskStatus::ALL.into_iter().map(|s| html! {
                                            <option value={s.as_str()} selected={task.status == s}>{s.as_str()}</option>
                                        })}
                                    </select>
                                    <button class="text-gray-300 hover:text-blue-400 px-2" onclick={onrefresh}>{"Refresh"}</button>
                                    <button class={button_danger()} onclick={ondelete}>{"Delete"}</button>
                                </div>
                            </div>
                        </div>
                    }
                }).collect::<Html>()}
            </div>

            <TaskForm {project_id} {on_created} />
        </div>
    }
}

fn format_timestamp(at: time::OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

#[derive(Clone, Default)]
struct TaskDraft {
    title: String,
    description: String,
    assigned_to: String,
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
    pub project_id: i32,
    pub on_created: Callback<TaskPublic>,
}

#[function_component]
pub fn TaskForm(props: &TaskFormProps) -> Html {
    let client = use_http_client();
    let draft = use_state(TaskDraft::default);
    let error = use_state(|| None::<String>);

    let field = |apply: fn(&mut TaskDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let project_id = props.project_id;
        let on_created = props.on_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let schema = TaskSchema {
                title: draft.title.trim().to_string(),
                description: draft.description.trim().to_string(),
                status: TaskStatus::Pending,
                assigned_to: draft.assigned_to.trim().to_string(),
            };
            if let Err(e) = validate_task(&schema) {
                error.set(Some(e.to_string()));
                return;
            }

            let client = client.clone();
            let draft = draft.clone();
            let error = error.clone();
            let on_created = on_created.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_task(&client, project_id, &schema).await {
                    Ok(task) => {
                        draft.set(TaskDraft::default());
                        error.set(None);
                        on_created.emit(task);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class={CARD}>
            <h2 class={HEADING_MD}>{"New Task"}</h2>
            {if let Some(error) = &*error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}
            <form {onsubmit} class={SPACE_Y_LG}>
                <div class={GRID_COLS_3}>
                    <input type="text" class={INPUT_BASE} placeholder="Title" value={draft.title.clone()}
                        oninput={field(|d, v| d.title = v)} />
                    <input type="text" class={INPUT_BASE} placeholder="Description" value={draft.description.clone()}
                        oninput={field(|d, v| d.description = v)} />
                    <input type="text" class={INPUT_BASE} placeholder="Assigned to" value={draft.assigned_to.clone()}
                        oninput={field(|d, v| d.assigned_to = v)} />
                </div>
                <button type="submit" class={button_primary()}>{"Add Task"}</button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn task(id: i32, status: TaskStatus) -> TaskPublic {
        TaskPublic {
            id,
            title: format!("Task {}", id),
            description: "Wireframes".into(),
            status,
            assigned_to: "Ana".into(),
            created_at: datetime!(2024-01-01 0:00 UTC),
            updated_at: datetime!(2024-01-01 0:00 UTC),
        }
    }

    #[test]
    fn refreshed_task_replaces_stale_copy() {
        let state = Rc::new(TasksState::default())
            .reduce(Msg::TasksLoaded(vec![task(1, TaskStatus::Pending), task(2, TaskStatus::Pending)]));

        let state = state.reduce(Msg::Saved(task(2, TaskStatus::Completed)));
        assert_eq!(state.tasks.len(), 2);
        assert_eq!(state.tasks[1].status, TaskStatus::Completed);

        let state = state.reduce(Msg::Deleted(1));
        assert_eq!(state.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn timestamps_render_as_rfc3339() {
        assert_eq!(format_timestamp(datetime!(2024-03-05 14:30 UTC)), "2024-03-05T14:30:00Z");
    }
}
