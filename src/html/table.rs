//! DataFrame to `<table>` rendering

use super::Element;
use crate::config::HtmlConfig;
use crate::core::error::Result;
use crate::DataFrame;

/// Render a DataFrame as a `<table>` element
///
/// At most `config.max_rows` body rows are rendered; when rows are cut off a
/// final row of `...` cells marks the truncation.
pub fn to_html_table(df: &DataFrame, config: &HtmlConfig) -> Result<Element> {
    let mut header = Element::new("tr");
    if config.show_index {
        header = header.child(Element::new("th"));
    }
    header = header.children(
        df.column_names()
            .iter()
            .map(|name| Element::new("th").text(name.as_str())),
    );

    let visible_rows = df.row_count().min(config.max_rows);
    let mut body = Element::new("tbody");

    for row in 0..visible_rows {
        let mut tr = Element::new("tr");
        if config.show_index {
            tr = tr.child(Element::new("th").text(row.to_string()));
        }
        for (_, column) in df.iter_columns() {
            tr = tr.child(Element::new("td").text(column.display_value(row)?));
        }
        body = body.child(tr);
    }

    if df.row_count() > visible_rows {
        let cells = df.column_count() + usize::from(config.show_index);
        let ellipsis = (0..cells).map(|_| Element::new("td").text("..."));
        body = body.child(Element::new("tr").children(ellipsis));
    }

    let mut table = Element::new("table");
    if !config.table_class.is_empty() {
        table = table.class(config.table_class.as_str());
    }

    Ok(table
        .child(Element::new("thead").child(header))
        .child(body))
}

impl DataFrame {
    /// Render this DataFrame as an HTML table string
    pub fn to_html(&self, config: &HtmlConfig) -> Result<String> {
        to_html_table(self, config).map(|table| table.to_string())
    }
}
