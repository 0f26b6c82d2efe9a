use std::fmt::Write;

use datapack_engine::db_types::{OrderView, Package, User};
use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn markdown_style(table: &mut Table) {
    table.set_format(markdown_format());
}

pub fn format_user(user: &User) -> String {
    let mut f = String::new();
    let _ = writeln!(f, "User #{}", user.id);
    let _ = writeln!(f, "Phone: {}", user.phone);
    let _ = writeln!(f, "Balance: {} LBP", user.balance);
    let _ = writeln!(f, "Registered: {}", user.created_at.format("%Y-%m-%d %H:%M"));
    f
}

pub fn format_packages(packages: &[Package]) -> String {
    if packages.is_empty() {
        return "The catalog is empty".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "Name", "Price (LBP)", "Active"]);
    for p in packages {
        table.add_row(row![p.id, p.name, r->p.price, if p.active { "yes" } else { "no" }]);
    }
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_orders(orders: &[OrderView]) -> String {
    if orders.is_empty() {
        return "No orders".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "Created", "Customer", "Package", "Price (LBP)", "Destination", "Status"]);
    for o in orders {
        table.add_row(row![
            o.id,
            o.created_at.format("%Y-%m-%d %H:%M"),
            o.phone,
            o.package_name,
            r->o.package_price,
            o.destination,
            o.status
        ]);
    }
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_order(order: &OrderView) -> String {
    let mut f = String::new();
    let _ = writeln!(f, "Order #{}: {}", order.id, order.status);
    let _ = writeln!(f, "Customer: {}", order.phone);
    let _ = writeln!(f, "Package: {} at {} LBP", order.package_name, order.package_price);
    let _ = writeln!(f, "Destination: {}", order.destination);
    let _ = writeln!(f, "Customer balance: {} LBP", order.balance);
    f
}
