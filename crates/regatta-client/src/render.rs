use standings::StandingsGrid;

const NO_RESULT: &str = "N/A";

/// Renders the grid as a fixed-width text table, leader first.
pub fn render_grid(grid: &StandingsGrid) -> String {
    if grid.is_empty() {
        return "No standings available for this regatta\n".to_string();
    }

    let mut header = vec!["#".to_string(), "Team".to_string(), "Total".to_string()];
    header.extend(grid.race_numbers.iter().map(|race| format!("R{}", race)));

    let mut rows = vec![header];
    for (idx, row) in grid.rows.iter().enumerate() {
        let mut line = vec![
            (idx + 1).to_string(),
            row.team_name.clone(),
            row.total_points.to_string(),
        ];
        line.extend(row.cells.iter().map(|cell| match cell.position() {
            Some(position) => position.to_string(),
            None => NO_RESULT.to_string(),
        }));
        rows.push(line);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                // team names left-aligned, numbers right-aligned
                if col == 1 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
