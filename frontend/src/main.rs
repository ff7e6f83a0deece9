use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod client_form;
mod client_projects;
mod clients;
mod home;
mod project_tasks;
mod styles;
pub mod http_client;
pub mod plugin;

use crate::{
    client_projects::ClientProjects,
    clients::Clients,
    home::Home,
    plugin::HttpClientProvider,
    project_tasks::ProjectTasks,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/clients")] Clients,
    #[at("/clients/:client_id")] ClientProjects { client_id: i32 },
    #[at("/clients/:client_id/projects/:project_id")] ProjectTasks { client_id: i32, project_id: i32 },
    #[not_found]
    #[at("/404")] NotFound,
}

fn nav_classes(active: bool) -> Classes {
    classes!(
        "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
        "transition-colors", "duration-200", "ease-in-out",
        "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
        if active {
            "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
        } else {
            ""
        }
    )
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();
    let in_clients = matches!(
        current_route,
        Some(Route::Clients | Route::ClientProjects { .. } | Route::ProjectTasks { .. })
    );

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Home} classes={nav_classes(current_route == Some(Route::Home))}>
                    {"Home"}
                </Link<Route>>
                <Link<Route> to={Route::Clients} classes={nav_classes(in_clients)}>
                    {"Clients"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <HttpClientProvider>
            <BrowserRouter>
                <div class="min-h-screen bg-gray-900">
                    <Navigation />
                    <div class="pt-16">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </BrowserRouter>
        </HttpClientProvider>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Clients => html! { <Clients /> },
        Route::ClientProjects { client_id } => html! { <ClientProjects {client_id} /> },
        Route::ProjectTasks { client_id, project_id } => html! { <ProjectTasks {client_id} {project_id} /> },
        Route::NotFound => html! {
            <div class="text-center text-gray-400 mt-16">{"Page not found"}</div>
        },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
