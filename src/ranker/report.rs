// The text printed on the console after a ranking.

use crate::ranker::*;

const COLUMN_GAP: usize = 5;

/// Formats the findings and the results of a ranking.
pub fn format_report(table: &PollTable, res: &AggregateResult, labels: &TableLabels) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(t) = table.unranked_token.as_ref() {
        lines.push(format!(
            "String \"{}\" in table interpreted to indicate 'not ranked'.",
            t
        ));
        lines.push("".to_string());
    }

    let corrections = res.corrections();
    for st in corrections.iter() {
        if st.computed_aggregate {
            lines.push(format!(
                "Total in survey for \"{}\" (aggregate) is {}.",
                st.poll_name, st.actual
            ));
        } else {
            lines.push(format!(
                "Total in survey for poll \"{}\" is incorrect; should be {}.",
                st.poll_name, st.actual
            ));
        }
    }
    if !corrections.is_empty() {
        lines.push("".to_string());
    }

    for d in res.aggregate_drift.iter() {
        let s = &res.subjects[d.subject_index].subject;
        lines.push(format!(
            "Rank of {} {} in \"{}\" is \"{}\" in the table; should be \"{}\".",
            s.number,
            s.name,
            table.aggregate_name(),
            d.found,
            d.computed.as_deref().unwrap_or("")
        ));
    }
    if !res.aggregate_drift.is_empty() {
        lines.push("".to_string());
    }

    let rows: Vec<[String; 4]> = res
        .subjects
        .iter()
        .map(|rs| {
            [
                rs.subject.number.clone(),
                rs.subject.name.clone(),
                rs.rank_label(&labels.tie_marker)
                    .unwrap_or_else(|| "-".to_string()),
                rs.score
                    .ratio()
                    .map(|r| format!("{:.4}", r.to_f64()))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let mut widths = [0usize; 4];
    for row in rows.iter() {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count() + COLUMN_GAP);
        }
    }

    lines.push("Subjects sorted by number: number - name - rank - score".to_string());
    for row in rows.iter() {
        lines.push(format_row(row, &widths));
    }
    lines.push("".to_string());

    lines.push("Subjects sorted by rank: number - name - rank - score".to_string());
    for idx in res.order.iter() {
        lines.push(format_row(&rows[*idx], &widths));
    }
    lines.push("".to_string());

    lines.push("Lowest rank in each quartile for each poll:".to_string());
    for (poll, q) in res.quartiles.iter() {
        let bounds = q.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string());
        lines.push(format!("\"{}\": {}", poll, bounds));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn format_row(row: &[String; 4], widths: &[usize; 4]) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect();
    cells.concat().trim_end().to_string()
}
