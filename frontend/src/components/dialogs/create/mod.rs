//! Dialog creating a new story or category.
//!
//! Elm-style split: `state` holds the `FormController` and DOM refs, `update`
//! turns messages into controller calls and async work, `view` renders the
//! controller's current draft. Browser adapters for the controller's ports
//! live in `ports`.

use yew::prelude::*;

mod helpers;
mod messages;
mod ports;
mod preview;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::CreateDialogProps;
pub use state::CreateDialog;

impl Component for CreateDialog {
    type Message = Msg;
    type Properties = CreateDialogProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut dialog = CreateDialog::new(ctx);
        if ctx.props().is_open {
            dialog.open(ctx);
        }
        dialog
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.is_open && (!old_props.is_open || props.kind != old_props.kind) {
            self.open(ctx);
        } else if !props.is_open && old_props.is_open {
            self.form.close();
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.form.close();
    }
}
