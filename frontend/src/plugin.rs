use yew::prelude::*;
use crate::http_client::{create_client, HttpClient};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Registers this client instead of building one from the defaults.
    #[prop_or_default]
    pub client: Option<HttpClient>,
    #[prop_or_default]
    pub children: Children,
}

/// Installs one `HttpClient` for the whole component tree below it.
///
/// The client is built on first render and kept for the provider's lifetime,
/// so every descendant calling [`use_http_client`] gets the same instance.
#[function_component]
pub fn HttpClientProvider(props: &Props) -> Html {
    let injected = props.client.clone();
    let client = use_memo(move |_| injected.unwrap_or_else(create_client), ());

    html! {
        <ContextProvider<HttpClient> context={(*client).clone()}>
            { for props.children.iter() }
        </ContextProvider<HttpClient>>
    }
}

#[hook]
pub fn use_http_client() -> HttpClient {
    use_context::<HttpClient>()
        .expect("use_http_client called outside of <HttpClientProvider>")
}
