use serde_json::Value;

const MIN_WIDTH: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// A table for a list of JSON values. Objects get one column per key, in
/// order of first appearance.
pub fn render_rows(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(vazio)");
    }
    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![cell(item)]).collect();
        return render(&["value"], &rows, options);
    }

    let mut headers: Vec<&str> = Vec::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| "-".to_string(), cell))
                .collect()
        })
        .collect();
    render(&headers, &rows, options)
}

/// Left-aligned columns separated by two spaces, numbers right-aligned.
pub fn render(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|value| value.chars().count())
                .chain([header.chars().count(), MIN_WIDTH])
                .max()
                .unwrap_or(MIN_WIDTH)
        })
        .collect();
    shrink(&mut widths, options.max_width);

    let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string();
    let header = line(
        headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| pad(&truncate(header, *width), *width, false))
            .collect(),
    );
    let mut lines = vec![header.clone(), "-".repeat(header.chars().count())];
    for row in rows {
        lines.push(line(
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = truncate(row.get(index).map_or("-", String::as_str), *width);
                    let numeric = is_numeric(&value);
                    let padded = pad(&value, *width, numeric);
                    if options.color { colorize(padded, &value) } else { padded }
                })
                .collect(),
        ));
    }
    lines.join("\n")
}

pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Narrow the widest column until the table fits.
fn shrink(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > MIN_WIDTH)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
        && value.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

fn colorize(padded: String, value: &str) -> String {
    let code = match value.to_lowercase().as_str() {
        "finalizado" | "true" | "admin" => "32",
        "em andamento" | "pausado" => "33",
        "false" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
