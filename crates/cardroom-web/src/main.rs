mod app;
mod canvas;
mod page;

fn main() {
    dioxus::launch(app::App);
}
