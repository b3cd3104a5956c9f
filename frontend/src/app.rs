use yew::{html, AttrValue, Component, Context, Html};

use common::model::kind::RecordKind;

use crate::components::dialogs::create::CreateDialog;
use crate::components::header::Header;
use crate::config::AppConfig;

pub struct App {
    config: AppConfig,
    dialog: Option<RecordKind>,
    last_saved: Option<RecordKind>,
}

pub enum AppMsg {
    Open(RecordKind),
    Close,
    Saved(RecordKind),
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            config: AppConfig::from_build_env(),
            dialog: None,
            last_saved: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Open(kind) => {
                self.dialog = Some(kind);
                self.last_saved = None;
            }
            AppMsg::Close => self.dialog = None,
            AppMsg::Saved(kind) => self.last_saved = Some(kind),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let api_base = AttrValue::from(self.config.api_base.clone());
        let saved_note = self.last_saved.map(|kind| match kind {
            RecordKind::Story => "Verhaal opgeslagen",
            RecordKind::Category => "Categorie opgeslagen",
        });

        html! {
            <div>
                <Header api_base={api_base.clone()} />
                <main class="admin-shell">
                    <div class="admin-actions">
                        <button onclick={link.callback(|_| AppMsg::Open(RecordKind::Story))}>
                            { "Nieuw verhaal" }
                        </button>
                        <button onclick={link.callback(|_| AppMsg::Open(RecordKind::Category))}>
                            { "Nieuwe categorie" }
                        </button>
                    </div>
                    if let Some(note) = saved_note {
                        <p class="saved-note">{ note }</p>
                    }
                    <CreateDialog
                        is_open={self.dialog.is_some()}
                        kind={self.dialog.unwrap_or(RecordKind::Story)}
                        on_close={link.callback(|_| AppMsg::Close)}
                        on_saved={link.callback(AppMsg::Saved)}
                        {api_base}
                    />
                </main>
            </div>
        }
    }
}
