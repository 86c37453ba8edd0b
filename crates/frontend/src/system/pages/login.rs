use crate::shared::query::use_api_client;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let client = use_api_client();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        is_loading.set(true);
        error_message.set(None);
        auth.login(
            client.clone(),
            email.get_untracked().trim().to_string(),
            password.get_untracked(),
            move |result| {
                is_loading.try_set(false);
                if let Err(e) = result {
                    error_message.try_set(Some(e));
                }
            },
        );
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"cPanel"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label>"Email"</label>
                        <Input
                            value=email
                            input_type=InputType::Email
                            placeholder="admin@example.com"
                            disabled=is_loading
                        />
                    </div>

                    <div class="form-group">
                        <label>"Password"</label>
                        <Input
                            value=password
                            input_type=InputType::Password
                            disabled=is_loading
                        />
                    </div>

                    <button type="submit" class="button button--primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
