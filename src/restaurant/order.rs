use axum::{debug_handler, response::{Html, Redirect}};
use axum_extra::extract::Form;
use time::OffsetDateTime;

use crate::{include_res, res::{self, escape, fill}};

use super::menu::{self, Order};

fn choices(field: &str, table: &[(&str, u32)]) -> String {
    table
        .iter()
        .map(|(name, cents)| {
            fill(
                include_res!(str, "/pages/restaurant/choice.html"),
                &[("field", field.to_owned()), ("name", escape(name)), ("price", menu::format_cents(*cents))],
            )
        })
        .collect()
}

fn list_items<'a>(values: impl Iterator<Item = &'a str>, empty: &str) -> String {
    let items: String = values.map(|value| format!("<li>{}</li>", escape(value))).collect();
    if items.is_empty() {
        format!("<li>{}</li>", escape(empty))
    } else {
        items
    }
}

#[debug_handler]
pub(crate) async fn main() -> Html<String> {
    res::page("Cloud Tea House", include_res!(str, "/pages/restaurant/main.html"))
}

#[debug_handler]
pub(crate) async fn order_page() -> Html<String> {
    let daily_special = menu::pick_daily_special();
    tracing::debug!("offering {daily_special} today");

    res::page(
        "Order",
        &fill(
            include_res!(str, "/pages/restaurant/order.html"),
            &[
                ("daily_special", escape(daily_special)),
                ("special_price", menu::format_cents(menu::SPECIAL_PRICE_CENTS)),
                ("menu_items", choices("items", &menu::MENU)),
                ("extra_items", choices("extras", &menu::EXTRAS)),
            ],
        ),
    )
}

#[debug_handler]
pub(crate) async fn back_to_order() -> Redirect {
    Redirect::to("/restaurant/order")
}

#[debug_handler]
pub(crate) async fn confirmation(Form(order): Form<Order>) -> Html<String> {
    let order = order.checked();
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let ready_time = menu::ready_time(now);
    tracing::info!("order for {} totals {}", order.name, menu::format_cents(order.total_cents()));

    let chosen_special = order.chosen_special();
    let special = match chosen_special {
        Some(special) => format!("<p>Including today's special, {}!</p>", escape(special)),
        None => String::new(),
    };
    let regular = order
        .items
        .iter()
        .map(String::as_str)
        .filter(|item| Some(*item) != chosen_special);
    let instructions = if order.instructions.trim().is_empty() { "none" } else { order.instructions.as_str() };

    res::page(
        "Order confirmed",
        &fill(
            include_res!(str, "/pages/restaurant/confirmation.html"),
            &[
                ("name", escape(&order.name)),
                ("email", escape(&order.email)),
                ("items", list_items(regular, "No drinks picked.")),
                ("special", special),
                ("extras", list_items(order.extras.iter().map(String::as_str), "No extras.")),
                ("instructions", escape(instructions)),
                ("total", menu::format_cents(order.total_cents())),
                ("ready_time", menu::format_clock(ready_time)),
            ],
        ),
    )
}
