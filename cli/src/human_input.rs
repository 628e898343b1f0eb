use tictactoe_engine::tictactoe::Position;

/// Parses a `row col` pair (zero-based, separated by whitespace or a comma).
pub fn parse_position(line: &str, size: usize) -> Result<Position, String> {
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();

    let [row, col] = parts.as_slice() else {
        return Err("Enter a row and a column, e.g. `1 2`".to_string());
    };

    let row: usize = row
        .parse()
        .map_err(|_| format!("Row `{}` is not a number", row))?;
    let col: usize = col
        .parse()
        .map_err(|_| format!("Column `{}` is not a number", col))?;

    if row >= size || col >= size {
        return Err(format!(
            "Position ({}, {}) is outside the board, both values must be below {}",
            row, col, size
        ));
    }

    Ok(Position::new(row, col))
}
