use yew::prelude::*;
use yew_router::prelude::*;
use std::rc::Rc;
use shared::models::{ClientPublic, FilterPage};
use crate::{Route, api, client_form::ClientForm, plugin::use_http_client, styles::*};

#[derive(Clone, Default, PartialEq)]
pub struct ClientsState {
    clients: Vec<ClientPublic>,
    loaded: bool,
    error: Option<String>,
}

pub enum Msg {
    Loaded(Vec<ClientPublic>),
    Created(ClientPublic),
    Deleted(i32),
    Error(String),
}

impl Reducible for ClientsState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::Loaded(clients) => {
                next.clients = clients;
                next.loaded = true;
                next.error = None;
            },
            Msg::Created(client) => {
                next.clients.push(client);
                next.error = None;
            },
            Msg::Deleted(id) => {
                next.clients.retain(|c| c.id != id);
            },
            Msg::Error(error) => {
                next.loaded = true;
                next.error = Some(error);
            },
        }
        Rc::new(next)
    }
}

#[function_component]
pub fn Clients() -> Html {
    let client = use_http_client();
    let state = use_reducer(ClientsState::default);

    {
        let client = client.clone();
        let state = state.clone();
        use_effect_with_deps(move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::list_clients(&client, &FilterPage::default()).await {
                    Ok(list) => state.dispatch(Msg::Loaded(list.clients)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
            || ()
        }, ());
    }

    let on_created = {
        let state = state.clone();
        Callback::from(move |created: ClientPublic| state.dispatch(Msg::Created(created)))
    };

    let on_delete = {
        let state = state.clone();
        Callback::from(move |id: i32| {
            let client = client.clone();
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_client(&client, id).await {
                    Ok(_) => state.dispatch(Msg::Deleted(id)),
                    Err(e) => state.dispatch(Msg::Error(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Clients"}</h1>

            {if let Some(error) = &state.error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            <div class="grid gap-4 md:grid-cols-2 mb-8">
                {state.clients.iter().map(|c| {
                    let id = c.id;
                    let ondelete = on_delete.reform(move |_: MouseEvent| id);
                    html! {
                        <div class={CARD_HOVER_SCALE} key={id}>
                            <Link<Route> to={Route::ClientProjects { client_id: id }}>
                                <h2 class={HEADING_SM} title={c.company.clone()}>{&c.company}</h2>
                                <p class={TEXT_MUTED}>{&c.email}</p>
                            </Link<Route>>
                            <div class="mt-4 flex justify-end">
                                <button class={button_danger()} onclick={ondelete}>{"Delete"}</button>
                            </div>
                        </div>
                    }
                }).collect::<Html>()}
            </div>

            {if !state.loaded {
                html! {
                    <div class="flex justify-center p-8">
                        <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading clients..."}</div>
                    </div>
                }
            } else if state.clients.is_empty() && state.error.is_none() {
                html! { <p class={combine_classes(TEXT_MUTED, "text-center mb-8")}>{"No clients yet."}</p> }
            } else { html! {} }}

            <ClientForm {on_created} />
        </div>
    }
}
