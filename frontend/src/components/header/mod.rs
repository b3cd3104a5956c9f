//! Site navigation bar. Not shown on admin pages.

use log::warn;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::form::CategoryDirectory;
use common::model::category::Category;

use crate::services::api::HttpCategoryDirectory;

pub struct Header {
    path: String,
    mobile_menu_open: bool,
    categories_open: bool,
    search_open: bool,
    search_query: String,
    categories: Vec<Category>,
}

pub enum HeaderMsg {
    ToggleMobileMenu,
    ToggleCategories,
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SubmitSearch,
    CategoriesLoaded(Vec<Category>),
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub api_base: AttrValue,
}

/// The navigation bar stays out of the admin area.
pub fn is_hidden_for(path: &str) -> bool {
    path.starts_with("/admin")
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn search_url(query: &str) -> String {
    format!(
        "/verhalen?zoek={}",
        String::from(js_sys::encode_uri_component(query.trim()))
    )
}

impl Component for Header {
    type Message = HeaderMsg;
    type Properties = HeaderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let path = current_path();
        if !is_hidden_for(&path) {
            let link = ctx.link().clone();
            let directory = HttpCategoryDirectory::new(ctx.props().api_base.to_string());
            spawn_local(async move {
                match directory.list_all().await {
                    Ok(categories) => link.send_message(HeaderMsg::CategoriesLoaded(categories)),
                    Err(err) => warn!("navigation categories unavailable: {err}"),
                }
            });
        }

        Self {
            path,
            mobile_menu_open: false,
            categories_open: false,
            search_open: false,
            search_query: String::new(),
            categories: Vec::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            HeaderMsg::ToggleMobileMenu => self.mobile_menu_open = !self.mobile_menu_open,
            HeaderMsg::ToggleCategories => self.categories_open = !self.categories_open,
            HeaderMsg::OpenSearch => self.search_open = true,
            HeaderMsg::CloseSearch => {
                self.search_open = false;
                self.search_query.clear();
            }
            HeaderMsg::SearchInput(query) => {
                self.search_query = query;
                return false;
            }
            HeaderMsg::SubmitSearch => {
                if self.search_query.trim().is_empty() {
                    return false;
                }
                if let Some(window) = web_sys::window() {
                    window.location().set_href(&search_url(&self.search_query)).ok();
                }
                return false;
            }
            HeaderMsg::CategoriesLoaded(categories) => self.categories = categories,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if is_hidden_for(&self.path) {
            return html! {};
        }
        let link = ctx.link();

        html! {
            <header class="site-header">
                <nav class="site-nav">
                    <a href="/" class="brand">{ "IngsScribblings" }</a>
                    <div class="nav-links">
                        <a href="/verhalen">{ "Verhalen" }</a>
                        { self.category_dropdown(link) }
                        <a href="/over-mij">{ "Over mij" }</a>
                    </div>
                    <input
                        class="search-trigger"
                        type="text"
                        placeholder="Zoeken..."
                        readonly=true
                        onclick={link.callback(|_| HeaderMsg::OpenSearch)}
                        onfocus={link.callback(|_| HeaderMsg::OpenSearch)}
                    />
                    <button
                        class="menu-toggle"
                        aria-label="Open menu"
                        onclick={link.callback(|_| HeaderMsg::ToggleMobileMenu)}
                    >
                        <i class="material-icons">{ "menu" }</i>
                    </button>
                </nav>
                { self.mobile_menu(link) }
                { self.search_overlay(link) }
            </header>
        }
    }
}

impl Header {
    fn category_dropdown(&self, link: &Scope<Self>) -> Html {
        html! {
            <div class="category-dropdown">
                <button onclick={link.callback(|_| HeaderMsg::ToggleCategories)}>
                    { "Categorieën" }
                </button>
                if self.categories_open {
                    <ul class="dropdown-menu">
                        { for self.categories.iter().map(|category| html! {
                            <li key={category.id}>
                                <a href={format!("/verhalen?categorie={}", category.id)}>
                                    { category.name.clone() }
                                </a>
                            </li>
                        }) }
                    </ul>
                }
            </div>
        }
    }

    fn mobile_menu(&self, link: &Scope<Self>) -> Html {
        if !self.mobile_menu_open {
            return html! {};
        }
        html! {
            <div class="mobile-menu">
                <button aria-label="Sluit menu" onclick={link.callback(|_| HeaderMsg::ToggleMobileMenu)}>
                    { "✕" }
                </button>
                <a href="/verhalen">{ "Verhalen" }</a>
                { for self.categories.iter().map(|category| html! {
                    <a key={category.id} href={format!("/verhalen?categorie={}", category.id)}>
                        { category.name.clone() }
                    </a>
                }) }
                <a href="/over-mij">{ "Over mij" }</a>
            </div>
        }
    }

    fn search_overlay(&self, link: &Scope<Self>) -> Html {
        if !self.search_open {
            return html! {};
        }
        let oninput = link.callback(|e: InputEvent| {
            HeaderMsg::SearchInput(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let onkeydown = link.batch_callback(|e: KeyboardEvent| match e.key().as_str() {
            "Enter" => Some(HeaderMsg::SubmitSearch),
            "Escape" => Some(HeaderMsg::CloseSearch),
            _ => None,
        });

        html! {
            <div class="search-overlay">
                <input
                    type="search"
                    placeholder="Zoek een verhaal..."
                    value={self.search_query.clone()}
                    {oninput}
                    {onkeydown}
                />
                <button aria-label="Sluit zoeken" onclick={link.callback(|_| HeaderMsg::CloseSearch)}>
                    { "✕" }
                </button>
            </div>
        }
    }
}
