use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Returns a table with lander's box-drawing style and the given header.
pub fn get_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.into_iter().map(Cell::new));
    table
}
