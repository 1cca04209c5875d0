use maud::{html, Markup};

use crate::domain::order::Order;
use crate::templates::desktop_layout;

pub struct OrdersVm<'a> {
    pub orders: &'a [Order],
    pub status: Option<&'a str>,
}

pub fn orders_page(vm: &OrdersVm) -> Markup {
    desktop_layout(
        "Orders",
        html! {
            main {
                h1 { "Orders" }

                @if let Some(status) = vm.status {
                    p class="status" { (status) }
                }

                form method="post" action="/orders/delete" {
                    div class="actions" {
                        a href="/orders/new" { "Add Order" }
                        button type="submit" { "Delete Selected" }
                        a href="/" { "Refresh" }
                    }

                    table {
                        thead {
                            tr {
                                th { "" }
                                th { "ID" }
                                th { "Customer" }
                                th { "Address" }
                                th { "Purchased" }
                                th { "Planned Delivery" }
                                th { "Model" }
                                th { "Notes" }
                                th { "Notified" }
                                th { "Created" }
                            }
                        }
                        tbody {
                            @for order in vm.orders {
                                tr {
                                    td { input type="checkbox" name="id" value=(order.id); }
                                    td { (order.id) }
                                    td { (order.customer_name) }
                                    td { (order.address.as_deref().unwrap_or("")) }
                                    td { (order.purchase_date) }
                                    td { (order.planned_delivery_date) }
                                    td { (order.model) }
                                    td { (order.notes.as_deref().unwrap_or("")) }
                                    td { @if order.notified_two_days { "yes" } @else { "no" } }
                                    td { (order.created_at.format("%Y-%m-%d %H:%M:%S")) }
                                }
                            }
                            @if vm.orders.is_empty() {
                                tr { td colspan="10" { "No orders yet." } }
                            }
                        }
                    }
                }

                form method="post" action="/notify" class="actions" {
                    button type="submit" { "Send Notifications" }
                }
            }
        },
    )
}
