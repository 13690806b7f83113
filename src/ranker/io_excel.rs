use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::ranker::*;

/// Reads one worksheet of an Excel file as a grid of strings.
pub fn read_excel_table(path: &str, worksheet: Option<&str>) -> RankerResult<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?,
        None => workbook.worksheet_range_at(0).context(EmptyExcelSnafu {})?,
    }
    .context(OpeningExcelSnafu { path })?;

    // The range starts at the first non-empty cell.
    let (row_offset, col_offset) = wrange.start().unwrap_or((0, 0));
    let mut res: Vec<Vec<String>> = Vec::new();
    for (row_idx, row) in wrange.rows().enumerate() {
        let mut cells: Vec<String> = Vec::new();
        for (col_idx, cell) in row.iter().enumerate() {
            let location = CellRef::new(
                row_idx + row_offset as usize,
                col_idx + col_offset as usize,
            );
            cells.push(read_cell(cell, location)?);
        }
        debug!("read_excel_table: row {:?}: {:?}", row_idx, &cells);
        res.push(cells);
    }
    Ok(res)
}

/// Renders a cell the way it would appear in a CSV export.
fn read_cell(cell: &DataType, location: CellRef) -> RankerResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        // Ranks typed in a spreadsheet are stored as floats.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        _ => ExcelWrongCellTypeSnafu {
            cell: location.to_string(),
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}
