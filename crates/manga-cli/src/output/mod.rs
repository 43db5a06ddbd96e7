use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    let rendered = match serde_json::to_value(value)? {
        Value::Array(items) => table::render_rows(&items, options),
        Value::Object(map) => {
            // An object holding one list (cards, users) renders that list;
            // the other fields become a key/value table above it.
            let (lists, fields): (Vec<_>, Vec<_>) =
                map.into_iter().partition(|(_, value)| is_object_list(value));
            let rows: Vec<Vec<String>> = fields
                .iter()
                .map(|(key, value)| vec![key.clone(), table::cell(value)])
                .collect();
            let mut sections = Vec::new();
            if !rows.is_empty() {
                sections.push(table::render(&["key", "value"], &rows, options));
            }
            for (key, list) in lists {
                if let Value::Array(items) = list {
                    sections.push(format!("{key}:\n{}", table::render_rows(&items, options)));
                }
            }
            sections.join("\n\n")
        }
        scalar => table::render(&["value"], &[vec![table::cell(&scalar)]], options),
    };
    Ok(rendered)
}

fn is_object_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_object))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Summary {
        total: usize,
        label: &'static str,
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&Summary { total: 3, label: "x" }, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["total"], 3);
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&Summary { total: 3, label: "x" }, OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_splits_lists_from_fields() {
        let value = json!({
            "label": "2 mangás encontrados",
            "cards": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
        });
        let out = render(&value, OutputFormat::Table).unwrap();
        assert!(out.starts_with("key"));
        assert!(out.contains("2 mangás encontrados"));
        assert!(out.contains("cards:\nid"));
    }
}
