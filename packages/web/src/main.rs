use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use domain::QuestBoxConfig;
use ui::{NotificationHost, QuestBoxProvider};
use views::{Board, Detail, NotFound, SignUp};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::Board { status: String::new() })]
    #[route("/signup")]
    SignUp {},
    #[route("/board?:status")]
    Board { status: String },
    #[route("/detail/:id")]
    Detail { id: String },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_TOML: &str = include_str!("../../../questbox.toml");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| QuestBoxConfig::from_toml_or_default(CONFIG_TOML));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::QUESTBOX_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        QuestBoxProvider {
            config: config,
            NotificationHost {
                Router::<Route> {}
            }
        }
    }
}
