use uuid::Uuid;
use yew::{
    classes, html, Callback, Classes, Component, Context, Html, MouseEvent, NodeRef, Properties,
};

/// Full-screen overlay holding one panel. Clicking the backdrop asks to close;
/// clicks inside the panel stay inside.
pub struct Modal {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    #[prop_or_default]
    pub children: Html,
    pub on_close: Callback<()>,
    /// Ref to the scrollable panel.
    #[prop_or_default]
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub shaking: bool,
    #[prop_or_default]
    pub class: Classes,
}

impl Component for Modal {
    type Message = ();
    type Properties = ModalProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("modal-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_backdrop = {
            let on_close = props.on_close.clone();
            Callback::from(move |_: MouseEvent| on_close.emit(()))
        };
        let keep_inside = Callback::from(|e: MouseEvent| e.stop_propagation());

        html! {
            <div class="modal-backdrop" onclick={on_backdrop}>
                <div
                    id={self.id.clone()}
                    ref={props.node_ref.clone()}
                    class={classes!("modal-panel", props.class.clone(), props.shaking.then_some("animate-shake"))}
                    onclick={keep_inside}
                >
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}
