use leptos::*;
use std::time::Duration;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });
        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|toasts| toasts.retain(|t| t.id != id)),
            TOAST_DURATION,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }
}

pub fn provide_toasts() {
    provide_context(ToastContext {
        toasts: create_rw_signal(Vec::new()),
        next_id: store_value(0),
    });
}

pub fn use_toasts() -> ToastContext {
    expect_context::<ToastContext>()
}

#[component]
pub fn Toasts() -> impl IntoView {
    let toasts = use_toasts().toasts;
    view! {
        <div class="toasts">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=|toast| view! { <div class=toast.kind.class()>{toast.message}</div> }
            />
        </div>
    }
}
