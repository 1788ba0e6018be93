pub mod classify;
pub mod error;
pub mod feedback;
pub mod health;
pub mod openapi;
pub mod queries;
pub mod symptoms;

pub use error::ApiError;

/// Escape a value for use inside an HTML table cell.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Quote a CSV field when it carries separators or quotes.
fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Self-contained HTML table document for browser printing.
///
/// Cells and headers are escaped here, callers pass raw values.
fn html_table_page(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let header_cells: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape_html(h)))
        .collect();

    let body_rows: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        "<!doctype html>\n\
         <html lang=\"es\">\n\
         <head>\n\
         <meta charset=\"utf-8\" />\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 24px; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ddd; padding: 8px; font-size: 12px; }}\n\
         th {{ background: #f3f4f6; text-align: left; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <table>\n\
         <thead><tr>{header_cells}</tr></thead>\n\
         <tbody>{body_rows}</tbody>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
        header_cells = header_cells,
        body_rows = body_rows,
    )
}

/// CSV document with a header row, RFC 4180 line endings.
fn csv_document(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&headers.iter().map(|h| escape_csv(h)).collect::<Vec<_>>().join(","));
    out.push_str("\r\n");
    for row in rows {
        out.push_str(&row.iter().map(|c| escape_csv(c)).collect::<Vec<_>>().join(","));
        out.push_str("\r\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>\"a\" & b</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; b&lt;/script&gt;"
        );
        assert_eq!(escape_html("sin cambios"), "sin cambios");
    }

    #[test]
    fn test_escape_csv_quotes_only_when_needed() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_html_table_page_escapes_cells() {
        let page = html_table_page(
            "Título",
            &["Col"],
            &[vec!["<img src=x>".to_string()]],
        );
        assert!(page.contains("<h1>Título</h1>"));
        assert!(page.contains("&lt;img src=x&gt;"));
        assert!(!page.contains("<img src=x>"));
    }

    #[test]
    fn test_csv_document_layout() {
        let doc = csv_document(
            &["timestamp", "category"],
            &[vec!["t1".to_string(), "Otra causa, general".to_string()]],
        );
        assert_eq!(
            doc,
            "timestamp,category\r\nt1,\"Otra causa, general\"\r\n"
        );
    }
}
