use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Overlay + surface. Closes on an overlay click unless `locked`.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    /// Ignore overlay clicks (e.g. while a request is running)
    #[prop(optional, into)]
    locked: MaybeProp<bool>,
    /// Extra class for the surface (`div.modal`)
    #[prop(optional)]
    modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Press and release must both hit the overlay, so selecting text inside
    // the modal and releasing outside does not close it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = !locked.get_untracked().unwrap_or(false)
            && overlay_mouse_down.get_untracked()
            && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // next tick: the overlay must not be removed during its own click dispatch
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let class = match modal_class {
        Some(extra) => format!("modal {}", extra),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}

/// Yes/no confirmation with a busy state and an inline error
#[component]
pub fn ConfirmModal(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: Signal<String>,
    #[prop(optional, into)]
    confirm_label: Option<String>,
    #[prop(optional, into)]
    busy: MaybeProp<bool>,
    #[prop(optional, into)]
    error: MaybeProp<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Delete".to_string());
    let busy = Signal::derive(move || busy.get().unwrap_or(false));

    view! {
        <ModalFrame on_close=on_cancel locked=busy modal_class="modal--confirm">
            <div class="modal-header">
                <h2 class="modal-title">{title}</h2>
            </div>
            <div class="modal-body">
                <p>{move || message.get()}</p>
                {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
            </div>
            <div class="modal-footer">
                <button
                    class="button button--secondary"
                    disabled=move || busy.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button
                    class="button button--danger"
                    disabled=move || busy.get()
                    on:click=move |_| on_confirm.run(())
                >
                    {move || if busy.get() { "Working...".to_string() } else { confirm_label.clone() }}
                </button>
            </div>
        </ModalFrame>
    }
}
