use crate::app::App;

mod api;
mod app;
mod components;
mod config;
mod helpers;
mod logger;
mod storage;
mod tops_sheet;

fn main() {
    logger::init();
    yew::Renderer::<App>::new().render();
}
