mod api;
mod app;
mod components;
mod pages;
mod router;
mod session_context;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<app::App>::new().render();
}
