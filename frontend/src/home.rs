use yew::prelude::*;
use yew_router::prelude::*;
use crate::{Route, api, plugin::use_http_client, styles::*};

#[function_component]
pub fn Home() -> Html {
    let client = use_http_client();
    let greeting = use_state(|| None::<Result<String, String>>);

    {
        let client = client.clone();
        let greeting = greeting.clone();
        use_effect_with_deps(move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::read_root(&client).await
                    .map(|message| message.message)
                    .map_err(|e| e.to_string());
                greeting.set(Some(result));
            });
            || ()
        }, ());
    }

    let content_type = client.config().header("content-type").unwrap_or("no content type");

    let backend_status = match &*greeting {
        None => html! {
            <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Contacting backend..."}</div>
        },
        Some(Ok(message)) => html! { <div class={alert_style("success")}>{message}</div> },
        Some(Err(error)) => html! { <div class={alert_style("error")}>{error}</div> },
    };

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"CRUD Manager"}</h1>

            <div class="space-y-8 max-w-3xl mx-auto">
                <div class={CARD}>
                    <h2 class={HEADING_SM}>{"Backend"}</h2>
                    {backend_status}
                    <p class={TEXT_MUTED}>
                        {format!("{} · timeout {} ms · {}", client.base_url(), client.timeout().as_millis(), content_type)}
                    </p>
                </div>

                <div class={CARD}>
                    <p class="text-gray-300 mb-4">
                        {"Track clients, the projects you run for them, and the tasks inside each project."}
                    </p>
                    <div class="flex justify-center">
                        <Link<Route> to={Route::Clients}
                            classes="bg-blue-600 hover:bg-blue-700 text-white px-8 py-3 rounded-lg text-lg font-semibold text-center transition-colors">
                            {"View Clients"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </div>
    }
}
