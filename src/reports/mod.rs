// ===== fcopt/src/reports/mod.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use fcopt::api::{Customer, FcSite};
use fcopt::render::{DisplayModel, MapView};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for i in 0..headers.len() {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

pub fn print_fc_table(title: &str, sites: &[FcSite]) {
    println!("\n{}", title);
    let mut table = new_table(&["FC id", "Latitude", "Longitude", "Opening cost"]);
    for fc in sites {
        table.add_row(vec![
            Cell::new(fc.fc_id).fg(Color::Cyan),
            Cell::new(fc.latitude),
            Cell::new(fc.longitude),
            Cell::new(fc.opening_cost),
        ]);
    }
    println!("{}", table);
}

pub fn print_customer_table(title: &str, customers: &[Customer]) {
    println!("\n{}", title);
    let mut table = new_table(&["cust_id", "lat", "lon", "assigned_fc"]);
    for c in customers {
        table.add_row(vec![
            Cell::new(c.cust_id),
            Cell::new(c.latitude),
            Cell::new(c.longitude),
            // unassigned customers get an empty cell
            Cell::new(c.assigned_fc.map(|id| id.to_string()).unwrap_or_default())
                .fg(Color::Cyan),
        ]);
    }
    println!("{}", table);
}

pub fn print_result(view: &DisplayModel<'_>) {
    println!("\n📊 Summary");
    println!("   Total cost: {}", view.total_cost);

    print_fc_table(&view.selected_label(), view.selected_fcs);
    if !view.all_fc_candidates.is_empty() {
        print_fc_table(&view.candidates_label(), view.all_fc_candidates);
    }
    print_customer_table(&view.customer_label(), view.customers);

    println!("\n🗺️  Map");
    match view.map {
        MapView::Image(b64) => println!("   PNG image, {} base64 chars", b64.len()),
        MapView::Placeholder => println!("   No map returned"),
    }
}
