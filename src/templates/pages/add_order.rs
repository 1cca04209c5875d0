use chrono::NaiveDate;
use maud::{html, Markup};

use crate::templates::desktop_layout;

pub fn add_order_page(purchase_default: NaiveDate, delivery_default: NaiveDate) -> Markup {
    desktop_layout(
        "Add Order",
        html! {
            main {
                h1 { "Add Order" }

                form method="post" action="/orders" {
                    label for="customer_name" { "Customer Name" }
                    input type="text" id="customer_name" name="customer_name";

                    label for="address" { "Address (optional)" }
                    input type="text" id="address" name="address";

                    label for="purchase_date" { "Purchase Date (YYYY-MM-DD)" }
                    input type="text" id="purchase_date" name="purchase_date" value=(purchase_default);

                    label for="planned_delivery_date" { "Planned Delivery Date (YYYY-MM-DD)" }
                    input type="text" id="planned_delivery_date" name="planned_delivery_date" value=(delivery_default);

                    label for="model" { "Model" }
                    input type="text" id="model" name="model";

                    label for="notes" { "Notes (optional)" }
                    input type="text" id="notes" name="notes";

                    div class="actions" {
                        button type="submit" { "Save" }
                        a href="/" { "Cancel" }
                    }
                }
            }
        },
    )
}
