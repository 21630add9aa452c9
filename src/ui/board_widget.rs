use crate::game::{Board, Coord};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Characters per cell, including padding.
pub const CELL_WIDTH: usize = 7;

/// Background colour for a tile value, darker for small tiles.
pub fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::Reset,
        2 => Color::Rgb(238, 228, 218),
        4 => Color::Rgb(237, 224, 200),
        8 => Color::Rgb(242, 177, 121),
        16 => Color::Rgb(245, 149, 99),
        32 => Color::Rgb(246, 124, 95),
        64 => Color::Rgb(246, 94, 59),
        128 => Color::Rgb(237, 207, 114),
        256 => Color::Rgb(237, 204, 97),
        512 => Color::Rgb(237, 200, 80),
        1024 => Color::Rgb(237, 197, 63),
        2048 => Color::Rgb(237, 194, 46),
        _ => Color::Rgb(60, 58, 50),
    }
}

fn tile_style(value: u32) -> Style {
    let fg = if value <= 4 {
        Color::Rgb(119, 110, 101)
    } else {
        Color::White
    };
    Style::default()
        .fg(fg)
        .bg(tile_color(value))
        .add_modifier(Modifier::BOLD)
}

/// Build one text line per board row.
///
/// Cells listed in `open` are drawn as `**`, and `highlight` (the last
/// spawned tile) is underlined.
pub fn board_lines(
    board: &Board,
    open: Option<&[Coord]>,
    highlight: Option<Coord>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for row in 0..board.rows() {
        let mut spans = Vec::new();
        for col in 0..board.cols() {
            let coord = Coord::new(row, col);
            let value = board.get(row, col);
            let is_open = open.is_some_and(|cells| cells.contains(&coord));

            let (symbol, mut style) = if is_open {
                ("**".to_string(), Style::default().fg(Color::Cyan))
            } else if value == 0 {
                (".".to_string(), Style::default().fg(Color::DarkGray))
            } else {
                (value.to_string(), tile_style(value))
            };
            if highlight == Some(coord) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            spans.push(Span::styled(
                format!("{:^width$}", symbol, width = CELL_WIDTH),
                style,
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines.pop();

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_layout() {
        let board = Board::from_rows(&[vec![2u32, 0], vec![0, 2048]]).unwrap();
        let lines = board_lines(&board, None, None);
        // two rows separated by one blank line
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "   2      .   ");
        assert_eq!(line_text(&lines[2]), "   .    2048  ");
    }

    #[test]
    fn test_board_lines_marks_open_cells() {
        let board = Board::from_rows(&[vec![2u32, 0], vec![0, 4]]).unwrap();
        let open = board.open_cells();
        let lines = board_lines(&board, Some(open.as_slice()), None);
        assert_eq!(line_text(&lines[0]), "   2     **   ");
        assert_eq!(line_text(&lines[2]), "  **      4   ");
    }

    #[test]
    fn test_highlight_underlines_tile() {
        let board = Board::from_rows(&[vec![2u32, 4]]).unwrap();
        let lines = board_lines(&board, None, Some(Coord::new(0, 1)));
        let style = lines[0].spans[1].style;
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert!(!lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_large_tiles_share_a_colour() {
        assert_eq!(tile_color(4096), tile_color(8192));
        assert_ne!(tile_color(2), tile_color(2048));
    }
}
