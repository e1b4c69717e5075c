//! Plain-text table of key rows

use crate::infrastructure::api_key::KeyRow;
use crate::infrastructure::i18n::{translate, Locale};

const COLUMN_GAP: &str = "  ";

pub fn render(rows: &[KeyRow], locale: Locale) -> String {
    if rows.is_empty() {
        return translate(locale, "settings.apiKeys.noKeys");
    }

    let header = [
        "ID".to_string(),
        translate(locale, "settings.apiKeys.keyDescription"),
        translate(locale, "settings.apiKeys.key"),
        translate(locale, "settings.apiKeys.created"),
        translate(locale, "settings.apiKeys.status"),
        translate(locale, "settings.apiKeys.actions"),
    ];

    let body: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.description.clone(),
                row.masked_key.clone(),
                row.created.clone(),
                row.status_label.clone(),
                row.action_label.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(format_line(&header, &widths));
    for cells in &body {
        lines.push(format_line(cells, &widths));
    }

    lines.join("\n")
}

fn format_line(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}
