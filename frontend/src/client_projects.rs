use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;
use std::rc::Rc;
use shared::{models::*, validation::{validate_client, validate_project, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH}};
use crate::{Route, api, plugin::use_http_client, styles::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub client_id: i32,
}

#[derive(Clone, Default, PartialEq)]
pub struct ProjectsState {
    owner: Option<ClientPublic>,
    projects: Vec<ProjectPublic>,
    total: i64,
    error: Option<String>,
    not_found: bool,
}

pub enum Msg {
    OwnerLoaded(ClientPublic),
    ProjectsLoaded(ProjectList),
    Created { project: ProjectPublic, filter: Option<ProjectStatus> },
    Updated { project: ProjectPublic, filter: Option<ProjectStatus> },
    Deleted(i32),
    NotFound,
    Error(String),
}

impl Reducible for ProjectsState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::OwnerLoaded(owner) => next.owner = Some(owner),
            Msg::ProjectsLoaded(list) => {
                next.total = list.total.unwrap_or(list.projects.len() as i64);
                next.projects = list.projects;
                next.error = None;
            },
            Msg::Created { project, filter } => {
                if shown(filter, project.status) {
                    next.projects.push(project);
                    next.total += 1;
                }
                next.error = None;
            },
            Msg::Updated { project, filter } => {
                if !shown(filter, project.status) {
                    let before = next.projects.len();
                    next.projects.retain(|p| p.id != project.id);
                    next.total -= (before - next.projects.len()) as i64;
                } else if let Some(existing) = next.projects.iter_mut().find(|p| p.id == project.id) {
                    *existing = project;
                }
                next.error = None;
            },
            Msg::Deleted(id) => {
                next.projects.retain(|p| p.id != id);
                next.total = (next.total - 1).max(0);
            },
            Msg::NotFound => next.not_found = true,
            Msg::Error(error) => next.error = Some(error),
        }
        Rc::new(next)
    }
}

fn shown(filter: Option<ProjectStatus>, status: ProjectStatus) -> bool {
    filter.map_or(true, |wanted| wanted == status)
}

#[function_component]
pub fn ClientProjects(props: &Props) -> Html {
    let client = use_http_client();
    let state = use_reducer(ProjectsState::default);
    let status_filter = use_state(|| None::<ProjectStatus>);
    let client_id = props.client_id;

    {
        let client = client.clone();
        let state = state.clone();
        use_effect_with_deps(move |client_id| {
            let client_id = *client_id;
            wasm_bindgen_futures::spawn_local(async move {
                match api::read_client(&client, client_id).await {
                    Ok(owner) => state.dispatch(Msg::OwnerLoaded(owner)),
                    Err(e) if e.is_not_found() => state.dispatch(Msg::NotFound),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
            || ()
        }, client_id);
    }

    {
        let client = client.clone();
        let state = state.clone();
        use_effect_with_deps(move |(client_id, status)| {
            let filter = ProjectFilter { status: *status, ..Default::default() };
            let client_id = *client_id;
            wasm_bindgen_futures::spawn_local(async move {
                match api::list_projects(&client, client_id, &filter).await {
                    Ok(list) => state.dispatch(Msg::ProjectsLoaded(list)),
                    Err(e) if e.is_not_found() => state.dispatch(Msg::NotFound),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
            || ()
        }, (client_id, *status_filter));
    }

    if state.not_found {
        return html! {
            <div class={CONTAINER}>
                <div class={alert_style("error")}>{"Client not found"}</div>
                <Link<Route> to={Route::Clients} classes="text-blue-400 hover:underline">{"Back to clients"}</Link<Route>>
            </div>
        };
    }

    let on_filter = {
        let status_filter = status_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            status_filter.set(select.value().parse().ok());
        })
    };

    let on_created = {
        let state = state.clone();
        let filter = *status_filter;
        Callback::from(move |project: ProjectPublic| state.dispatch(Msg::Created { project, filter }))
    };

    let on_owner_saved = {
        let state = state.clone();
        Callback::from(move |owner: ClientPublic| state.dispatch(Msg::OwnerLoaded(owner)))
    };

    let on_status = {
        let client = client.clone();
        let state = state.clone();
        let filter = *status_filter;
        Callback::from(move |(project_id, status): (i32, ProjectStatus)| {
            let client = client.clone();
            let state = state.clone();
            let update = ProjectUpdate { status: Some(status), ..Default::default() };
            wasm_bindgen_futures::spawn_local(async move {
                match api::patch_project(&client, client_id, project_id, &update).await {
                    Ok(project) => state.dispatch(Msg::Updated { project, filter }),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        let state = state.clone();
        Callback::from(move |project_id: i32| {
            let client = client.clone();
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_project(&client, client_id, project_id).await {
                    Ok(_) => state.dispatch(Msg::Deleted(project_id)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
        })
    };

    let heading = state.owner.as_ref()
        .map(|owner| format!("{} · Projects", owner.company))
        .unwrap_or_else(|| "Projects".into());

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{heading}</h1>

            {if let Some(error) = &state.error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            <div class={combine_classes(FLEX_BETWEEN, "mb-4")}>
                <span class={TEXT_MUTED}>{format!("{} project(s)", state.total)}</span>
                <select class="bg-gray-800 text-white border border-gray-600 rounded-md px-3 py-1" onchange={on_filter}>
                    <option value="" selected={status_filter.is_none()}>{"All statuses"}</option>
                    {for ProjectStatus::ALL.into_iter().map(|s| html! {
                        <option value={s.as_str()} selected={*status_filter == Some(s)}>{s.as_str()}</option>
                    })}
                </select>
            </div>

            <div class={combine_classes(SPACE_Y_BASE, "mb-8")}>
                {state.projects.iter().map(|project| {
                    let id = project.id;
                    let ondelete = on_delete.reform(move |_: MouseEvent| id);
                    let onchange = on_status.reform(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        (id, select.value().parse().unwrap_or(ProjectStatus::Pending))
                    });
                    html! {
                        <div class={CARD_SECTION} key={id}>
                            <div class={FLEX_BETWEEN}>
                                <Link<Route> to={Route::ProjectTasks { client_id, project_id: id }}
                                    classes="text-lg font-semibold text-gray-100 hover:text-blue-400">
                                    {&project.title}
                                </Link<Route>>
                                <span class={status_badge(project.status.as_str())}>{project.status.as_str()}</span>
                            </div>
                            <p class={combine_classes(TEXT_MUTED, "my-2")}>{&project.description}</p>
                            <div class="flex justify-end gap-2">
                                <select class="bg-gray-700 text-white rounded-md px-2" {onchange}>
                                    {for ProjectStatus::ALL.into_iter().map(|s| html! {
                                        <option value={s.as_str()} selected={project.status == s}>{s.as_str()}</option>
                                    })}
                                </select>
                                <button class={button_danger()} onclick={ondelete}>{"Delete"}</button>
                            </div>
                        </div>
                    }
                }).collect::<Html>()}
            </div>

            <ProjectForm {client_id} {on_created} />

            {match &state.owner {
                Some(owner) => html! { <ClientEditor owner={owner.clone()} on_saved={on_owner_saved} /> },
                None => html! {},
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ClientEditorProps {
    pub owner: ClientPublic,
    pub on_saved: Callback<ClientPublic>,
}

/// Edits the owning client. The phone number is not part of the public
/// record, so it has to be entered again on every save.
#[function_component]
pub fn ClientEditor(props: &ClientEditorProps) -> Html {
    let client = use_http_client();
    let company = use_state(|| props.owner.company.clone());
    let email = use_state(|| props.owner.email.clone());
    let phone = use_state(String::new);
    let error = use_state(|| None::<String>);

    let bind = |value: &UseStateHandle<String>| {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };

    let onsubmit = {
        let company = company.clone();
        let email = email.clone();
        let phone = phone.clone();
        let error = error.clone();
        let client_id = props.owner.id;
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let schema = ClientSchema {
                company: company.trim().to_string(),
                email: email.trim().to_string(),
                phone: phone.trim().to_string(),
            };
            if let Err(e) = validate_client(&schema) {
                error.set(Some(e.to_string()));
                return;
            }

            let client = client.clone();
            let phone = phone.clone();
            let error = error.clone();
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::patch_client(&client, client_id, &schema).await {
                    Ok(owner) => {
                        phone.set(String::new());
                        error.set(None);
                        on_saved.emit(owner);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class={combine_classes(CARD, "mt-8")}>
            <h2 class={HEADING_MD}>{"Edit Client"}</h2>
            {if let Some(error) = &*error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}
            <form {onsubmit} class={SPACE_Y_LG}>
                <div class={GRID_COLS_3}>
                    <input type="text" class={INPUT_BASE} placeholder="Company" value={(*company).clone()}
                        oninput={bind(&company)} />
                    <input type="email" class={INPUT_BASE} placeholder="Email" value={(*email).clone()}
                        oninput={bind(&email)} />
                    <input type="tel" class={INPUT_BASE} placeholder="Phone" value={(*phone).clone()}
                        oninput={bind(&phone)} />
                </div>
                <button type="submit" class={button_primary()}>{"Save Client"}</button>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectFormProps {
    pub client_id: i32,
    pub on_created: Callback<ProjectPublic>,
}

#[function_component]
pub fn ProjectForm(props: &ProjectFormProps) -> Html {
    let client = use_http_client();
    let title = use_state(String::new);
    let description = use_state(String::new);
    let status = use_state(|| ProjectStatus::Pending);
    let error = use_state(|| None::<String>);

    let on_title = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_description = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };

    let on_status = {
        let status = status.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse() {
                status.set(value);
            }
        })
    };

    let onsubmit = {
        let title = title.clone();
        let description = description.clone();
        let status = status.clone();
        let error = error.clone();
        let client_id = props.client_id;
        let on_created = props.on_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let schema = ProjectSchema {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                status: *status,
            };
            if let Err(e) = validate_project(&schema) {
                error.set(Some(e.to_string()));
                return;
            }

            let client = client.clone();
            let title = title.clone();
            let description = description.clone();
            let status = status.clone();
            let error = error.clone();
            let on_created = on_created.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_project(&client, client_id, &schema).await {
                    Ok(project) => {
                        title.set(String::new());
                        description.set(String::new());
                        status.set(ProjectStatus::Pending);
                        error.set(None);
                        on_created.emit(project);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class={CARD}>
            <h2 class={HEADING_MD}>{"New Project"}</h2>
            {if let Some(error) = &*error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}
            <form {onsubmit} class={SPACE_Y_LG}>
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Title"}</label>
                    <input type="text" class={INPUT_BASE} value={(*title).clone()}
                        maxlength={MAX_TITLE_LENGTH.to_string()} oninput={on_title} />
                </div>
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Description"}</label>
                    <textarea class={INPUT_BASE} rows="3" value={(*description).clone()}
                        maxlength={MAX_DESCRIPTION_LENGTH.to_string()} oninput={on_description} />
                </div>
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Status"}</label>
                    <select class={INPUT_BASE} onchange={on_status}>
                        {for ProjectStatus::ALL.into_iter().map(|s| html! {
                            <option value={s.as_str()} selected={*status == s}>{s.as_str()}</option>
                        })}
                    </select>
                </div>
                <button type="submit" class={button_primary()}>{"Create Project"}</button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn project(id: i32, status: ProjectStatus) -> ProjectPublic {
        ProjectPublic {
            id,
            title: format!("Project {}", id),
            description: "Rebuild".into(),
            status,
            created_at: datetime!(2024-01-01 0:00 UTC),
            updated_at: datetime!(2024-01-01 0:00 UTC),
        }
    }

    fn loaded(projects: Vec<ProjectPublic>) -> Rc<ProjectsState> {
        let total = projects.len() as i64;
        Rc::new(ProjectsState::default())
            .reduce(Msg::ProjectsLoaded(ProjectList { projects, total: Some(total) }))
    }

    #[test]
    fn created_project_outside_filter_is_not_listed() {
        let state = loaded(vec![project(1, ProjectStatus::Doing)]);

        let state = state.reduce(Msg::Created {
            project: project(2, ProjectStatus::Pending),
            filter: Some(ProjectStatus::Doing),
        });
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.total, 1);

        let state = state.reduce(Msg::Created {
            project: project(3, ProjectStatus::Doing),
            filter: Some(ProjectStatus::Doing),
        });
        assert_eq!(state.projects.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(state.total, 2);

        let state = state.reduce(Msg::Created { project: project(4, ProjectStatus::Paused), filter: None });
        assert_eq!(state.total, 3);
    }

    #[test]
    fn status_change_out_of_filter_drops_project() {
        let state = loaded(vec![project(1, ProjectStatus::Doing), project(2, ProjectStatus::Doing)]);

        let state = state.reduce(Msg::Updated {
            project: project(1, ProjectStatus::Completed),
            filter: Some(ProjectStatus::Doing),
        });
        assert_eq!(state.projects.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(state.total, 1);

        let state = state.reduce(Msg::Updated {
            project: project(2, ProjectStatus::Paused),
            filter: None,
        });
        assert_eq!(state.projects[0].status, ProjectStatus::Paused);
        assert_eq!(state.total, 1);
    }

    #[test]
    fn saved_owner_replaces_loaded_one() {
        let owner = ClientPublic { id: 1, company: "Acme".into(), email: "ops@acme.test".into() };
        let state = Rc::new(ProjectsState::default()).reduce(Msg::OwnerLoaded(owner));

        let renamed = ClientPublic { id: 1, company: "Acme Corp".into(), email: "ops@acme.test".into() };
        let state = state.reduce(Msg::OwnerLoaded(renamed.clone()));
        assert_eq!(state.owner, Some(renamed));
    }
}
