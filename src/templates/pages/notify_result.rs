use maud::{html, Markup};

use crate::templates::desktop_layout;

pub fn notify_result_page(message: &str) -> Markup {
    desktop_layout(
        "Notifications",
        html! {
            main {
                h1 { "Notifications" }
                p { (message) }
                p { a href="/" { "Back to orders" } }
            }
        },
    )
}
