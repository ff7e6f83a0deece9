use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew::context::ContextHandle;
use shared::{models::{ClientPublic, ClientSchema}, validation::{self, MAX_COMPANY_LENGTH, MAX_EMAIL_LENGTH, MAX_PHONE_LENGTH}};
use crate::{api, http_client::HttpClient, styles::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_created: Callback<ClientPublic>,
}

#[derive(Clone, Default)]
pub struct FormState {
    company: String,
    email: String,
    phone: String,
    error: Option<String>,
    submitting: bool,
}

pub struct ClientForm {
    state: FormState,
    client: HttpClient,
    _context: ContextHandle<HttpClient>,
}

pub enum Msg {
    UpdateField(&'static str, String),
    Submit,
    SubmitResult(Result<ClientPublic, String>),
    ClientChanged(HttpClient),
}

impl Component for ClientForm {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let (client, context) = ctx
            .link()
            .context::<HttpClient>(ctx.link().callback(Msg::ClientChanged))
            .expect("ClientForm rendered outside of <HttpClientProvider>");

        Self {
            state: FormState::default(),
            client,
            _context: context,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateField(field, value) => {
                match field {
                    "company" => self.state.company = value,
                    "email" => self.state.email = value,
                    "phone" => self.state.phone = value,
                    _ => return false,
                }
                true
            },
            Msg::Submit => {
                let schema = self.schema();
                if let Err(error) = validation::validate_client(&schema) {
                    self.state.error = Some(error.to_string());
                    return true;
                }

                self.state.submitting = true;
                self.state.error = None;

                let client = self.client.clone();
                ctx.link().send_future(async move {
                    Msg::SubmitResult(
                        api::create_client(&client, &schema).await.map_err(|e| e.to_string())
                    )
                });
                true
            },
            Msg::SubmitResult(result) => {
                self.state.submitting = false;
                match result {
                    Ok(created) => {
                        self.state = FormState::default();
                        ctx.props().on_created.emit(created);
                    }
                    Err(error) => self.state.error = Some(error),
                }
                true
            },
            Msg::ClientChanged(client) => {
                self.client = client;
                false
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class={CARD}>
                <h2 class={HEADING_MD}>{"New Client"}</h2>
                {if let Some(error) = &self.state.error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}
                <form {onsubmit} class={SPACE_Y_LG}>
                    {self.render_input(ctx, "company", "Company", "text", MAX_COMPANY_LENGTH)}
                    {self.render_input(ctx, "email", "Email", "email", MAX_EMAIL_LENGTH)}
                    {self.render_input(ctx, "phone", "Phone", "tel", MAX_PHONE_LENGTH)}
                    <button type="submit" class={button_primary()} disabled={self.state.submitting}>
                        {if self.state.submitting { "Saving..." } else { "Create Client" }}
                    </button>
                </form>
            </div>
        }
    }
}

impl ClientForm {
    fn schema(&self) -> ClientSchema {
        ClientSchema {
            company: self.state.company.trim().to_string(),
            email: self.state.email.trim().to_string(),
            phone: self.state.phone.trim().to_string(),
        }
    }

    fn render_input(&self, ctx: &Context<Self>, field: &'static str, label: &str, kind: &'static str, max_length: usize) -> Html {
        let value = match field {
            "company" => &self.state.company,
            "email" => &self.state.email,
            "phone" => &self.state.phone,
            _ => return html! {},
        };

        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateField(field, input.value())
        });

        html! {
            <div class={SPACE_Y_BASE}>
                <label class={TEXT_LABEL}>{label}</label>
                <input type={kind} class={INPUT_BASE} value={value.clone()}
                    maxlength={max_length.to_string()} {oninput}
                    placeholder={format!("Enter {}", label.to_lowercase())} />
            </div>
        }
    }
}
