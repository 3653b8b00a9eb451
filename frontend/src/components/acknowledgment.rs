use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AcknowledgmentProps {
    pub message: AttrValue,
}

#[function_component(Acknowledgment)]
pub fn acknowledgment(props: &AcknowledgmentProps) -> Html {
    let visible = use_state(|| true);

    let dismiss = {
        let visible = visible.clone();
        Callback::from(move |_: MouseEvent| visible.set(false))
    };

    if !*visible {
        return html! {};
    }

    html! {
        <div class="form-acknowledgment" role="status">
            <p>{props.message.clone()}</p>
            <button class="form-acknowledgment-close" aria-label="Close" onclick={dismiss}>
                {"×"}
            </button>
            <style>
                {r#"
                    .form-acknowledgment {
                        position: fixed;
                        bottom: 2rem;
                        left: 50%;
                        transform: translateX(-50%);
                        display: flex;
                        align-items: center;
                        gap: 1rem;
                        padding: 1rem 1.5rem;
                        background: rgba(26, 26, 26, 0.95);
                        color: #fff;
                        border-radius: 12px;
                        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.25);
                        z-index: 1000;
                        animation: ackFadeIn 0.3s ease-out;
                    }
                    .form-acknowledgment p {
                        margin: 0;
                    }
                    .form-acknowledgment-close {
                        background: none;
                        border: none;
                        color: inherit;
                        font-size: 1.25rem;
                        cursor: pointer;
                    }
                    @keyframes ackFadeIn {
                        from { opacity: 0; transform: translate(-50%, 1rem); }
                        to { opacity: 1; transform: translate(-50%, 0); }
                    }
                "#}
            </style>
        </div>
    }
}

/// Mounts a fresh acknowledgment on `<body>` and tears it down after `duration_ms`.
pub fn show(message: &str, duration_ms: u32) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let host = match document.create_element("div") {
        Ok(host) => host,
        Err(e) => {
            log::warn!("Could not create acknowledgment host: {:?}", e);
            return;
        }
    };
    if body.append_child(&host).is_err() {
        return;
    }

    let props = AcknowledgmentProps {
        message: AttrValue::from(message.to_string()),
    };
    let app = yew::Renderer::<Acknowledgment>::with_root_and_props(host.clone(), props).render();

    Timeout::new(duration_ms, move || {
        app.destroy();
        host.remove();
    })
    .forget();
}
