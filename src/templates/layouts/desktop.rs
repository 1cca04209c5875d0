use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
header { display: flex; align-items: center; justify-content: space-between; }
nav ul { display: flex; gap: 1rem; list-style: none; padding: 0; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 6px 8px; text-align: left; }
th { background: #f5f5f5; }
form label { display: block; margin-top: 0.75rem; }
input[type=text] { width: 100%; max-width: 420px; padding: 6px; }
.actions { display: flex; gap: 10px; align-items: center; margin: 1rem 0; }
.status { color: #16a34a; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "OrderReminder" }
                    nav {
                        ul {
                            li { a href="/" { "Orders" } }
                            li { a href="/orders/new" { "Add Order" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
