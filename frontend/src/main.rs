use crate::app::App;
use crate::config::AppConfig;

mod app;
mod components;
mod config;
mod logger;
mod services;

fn main() {
    logger::init(AppConfig::from_build_env().log_level);
    yew::Renderer::<App>::new().render();
}
