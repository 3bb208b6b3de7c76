use colored::{Color, ColoredString, Colorize};
use serde_json::Value;

use crate::core::models::change_event::{ChangeCategory, ChangeEvent};
use crate::core::models::raw_log::RawLogRecord;

/// Icon and color for an action, chosen by keyword.
fn action_style(action: &str) -> (&'static str, Option<Color>) {
    let has = |words: &[&str]| words.iter().any(|w| action.contains(w));
    if has(&["Crear", "Agregar"]) {
        ("➕", Some(Color::Green))
    } else if has(&["Editar", "Actualizar"]) {
        ("✏️", Some(Color::Blue))
    } else if has(&["Eliminar", "Borrar"]) {
        ("🗑️", Some(Color::Red))
    } else if has(&["Archivar"]) {
        ("📁", Some(Color::Magenta))
    } else if has(&["Login"]) {
        ("🔑", None)
    } else if has(&["Logout"]) {
        ("🚪", None)
    } else if has(&["Subir"]) {
        ("📤", None)
    } else if has(&["Descargar"]) {
        ("📥", None)
    } else {
        ("📝", None)
    }
}

fn format_action(action: &str) -> String {
    let (icon, color) = action_style(action);
    let text = match color {
        Some(c) => action.color(c),
        None => action.normal(),
    };
    format!("{icon} {text}")
}

fn paint_category(category: ChangeCategory, text: &str) -> ColoredString {
    match category {
        ChangeCategory::Creation => text.green(),
        ChangeCategory::Edit => text.blue(),
        ChangeCategory::Metrics => text.magenta(),
        ChangeCategory::StatusChange => text.yellow(),
        ChangeCategory::Archived => text.dimmed(),
    }
}

/// `dd/mm/yyyy HH:MM:SS`, or the raw text when it cannot be parsed.
pub fn format_log_time(record: &RawLogRecord) -> String {
    match (record.occurred_at(), record.timestamp.as_deref()) {
        (Some(at), _) => at.format("%d/%m/%Y %H:%M:%S").to_string(),
        (None, Some(raw)) if !raw.trim().is_empty() => raw.to_string(),
        _ => "—".to_string(),
    }
}

/// Display form of a before/after value: null → `N/A`, booleans as
/// `Sí`/`No`, numbers with thousands separators, strings verbatim.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::Bool(true) => "Sí".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => group_thousands(&i.to_string()),
            (None, Some(f)) => {
                let text = f.to_string();
                match text.split_once('.') {
                    Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
                    None => group_thousands(&text),
                }
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Insert `,` every three digits of an integer literal.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

/// Print one log record as a formatted row.
pub fn print_log_entry(record: &RawLogRecord, show_details: bool) {
    let role = if record.role.is_empty() {
        String::new()
    } else {
        format!(" ({})", record.role)
    };
    let target = if record.entity_id.is_empty() {
        record.entity.clone()
    } else {
        format!("{} #{}", record.entity, record.entity_id)
    };

    println!(
        "  {} {} {}  {}{}  {}",
        format_log_time(record).dimmed(),
        "│".dimmed(),
        format_action(&record.action),
        record.user.bold(),
        role.dimmed(),
        target.cyan(),
    );

    if let Some(description) = record.description_text() {
        println!("      {}", description.dimmed());
    }

    if show_details {
        print_details(record);
    }
}

/// Print the before/after payload of a record, or the whole payload
/// when it has no such shape.
fn print_details(record: &RawLogRecord) {
    let Some(details) = record.detail_value() else {
        println!("      {}", "No details".dimmed());
        return;
    };
    let Value::Object(map) = &details else {
        println!("      {}", format_value(&details).dimmed());
        return;
    };

    let mut printed = false;
    for (key, label) in [("antes", "Before"), ("despues", "After")] {
        if let Some(value) = map.get(key) {
            println!("      {}", label.bold());
            print_indented_json(value);
            printed = true;
        }
    }
    if !printed {
        print_indented_json(&details);
    }
}

fn print_indented_json(value: &Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    for line in pretty.lines() {
        println!("        {}", line.dimmed());
    }
}

/// Print one change event as a history card.
pub fn print_change_event(event: &ChangeEvent) {
    let badge = format!("{} {:<8}", event.category.icon(), event.category.label());
    println!(
        "  {} {} {}  {}",
        paint_category(event.category, &badge),
        "│".dimmed(),
        event.field_label,
        event.timestamp.format("%d/%m/%Y %H:%M").to_string().dimmed(),
    );
    println!(
        "      {} changed {}",
        event.user.bold(),
        event.field_label.bold()
    );

    if let (Some(previous), Some(new)) = (&event.previous_value, &event.new_value) {
        println!(
            "      {} → {}",
            format_value(previous).red(),
            format_value(new).green()
        );
    }

    if let Some(comment) = &event.comment {
        println!("      {}", format!("\"{comment}\"").italic().dimmed());
    }
}

/// `"1 change found"` / `"3 changes found"`.
pub fn count_summary(count: usize, noun: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{plural} found")
}
