//! Table output for the film collection.
//!
//! Columns are aligned on display width, so titles in CJK scripts or with
//! combining accents line up. Rows alternate white and green.

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::model::Film;

const HEADERS: [&str; 9] = [
    "Days", "Title", "Director", "MUBI", "IMDB", "Mins", "Year", "Country", "Genre",
];

/// Spaces between columns
const GAP: usize = 4;

const ROW_COLORS: [Color; 2] = [Color::White, Color::Green];

/// Table rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableStyle {
    /// Plain text without ANSI colours
    pub no_color: bool,
    /// Maximum characters per text cell; `None` for unlimited
    pub max_len: Option<usize>,
}

/// Render films as an aligned table, in the order given.
///
/// The header, and the table end, are framed by blank lines.
pub fn render_table(films: &[Film], style: TableStyle) -> String {
    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = films.iter().map(|f| cells(f, style.max_len)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let blank = String::new();
    push_line(&mut out, &blank, Color::White, style.no_color);
    push_line(&mut out, &format_row(&header, &widths), Color::White, style.no_color);
    push_line(&mut out, &blank, Color::White, style.no_color);
    for (i, row) in rows.iter().enumerate() {
        let color = ROW_COLORS[i % ROW_COLORS.len()];
        push_line(&mut out, &format_row(row, &widths), color, style.no_color);
    }
    push_line(&mut out, &blank, Color::White, style.no_color);
    out
}

fn push_line(out: &mut String, line: &str, color: Color, no_color: bool) {
    if no_color || line.is_empty() {
        out.push_str(line);
    } else {
        out.push_str(&line.with(color).to_string());
    }
    out.push('\n');
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        line.push_str(cell);
        if i < last {
            let pad = width.saturating_sub(cell.width()) + GAP;
            line.extend(std::iter::repeat_n(' ', pad));
        }
    }
    line.trim_end().to_string()
}

fn cells(film: &Film, max_len: Option<usize>) -> Vec<String> {
    let text = |s: &str| truncate(s, max_len).to_string();
    vec![
        film.days.to_string(),
        text(&film.title),
        text(&film.director),
        text(&rating_cell(film.mubi_rating, &film.mubi_ratings_num)),
        text(&imdb_cell(film)),
        film.mins.to_string(),
        film.year.to_string(),
        text(&film.country),
        text(&film.genre),
    ]
}

fn rating_cell(rating: f64, count: &str) -> String {
    format!("{rating:.1} ({count})")
}

/// A zero IMDb rating means "unknown" and renders blank.
fn imdb_cell(film: &Film) -> String {
    if film.imdb_rating == 0.0 {
        String::new()
    } else {
        rating_cell(film.imdb_rating, &film.imdb_ratings_num)
    }
}

/// Cut `s` to at most `max_len` characters.
fn truncate(s: &str, max_len: Option<usize>) -> &str {
    match max_len.and_then(|max| s.char_indices().nth(max)) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::film;

    fn plain(max_len: Option<usize>) -> TableStyle {
        TableStyle {
            no_color: true,
            max_len,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Kieślowski", Some(4)), "Kieś");
        assert_eq!(truncate("Short", Some(32)), "Short");
        assert_eq!(truncate("Anything", None), "Anything");
        assert_eq!(truncate("Zero", Some(0)), "");
    }

    #[test]
    fn test_rating_cells() {
        let mut f = film("A", "B", 1);
        f.mubi_rating = 7.94;
        f.mubi_ratings_num = "1,024".to_string();
        assert_eq!(rating_cell(f.mubi_rating, &f.mubi_ratings_num), "7.9 (1,024)");

        assert_eq!(imdb_cell(&f), "");
        f.imdb_rating = 8.0;
        f.imdb_ratings_num = "99".to_string();
        assert_eq!(imdb_cell(&f), "8.0 (99)");
    }

    #[test]
    fn test_render_plain_table() {
        let films = vec![film("Stalker", "Andrei Tarkovsky", 30), film("Blue", "K", 5)];
        let table = render_table(&films, plain(None));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("Days    Title      Director"));
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("30      Stalker    Andrei Tarkovsky"));
        assert!(lines[4].starts_with("5       Blue       K"));
        assert_eq!(lines[5], "");
        assert!(!table.contains('\u{1b}'));
    }

    #[test]
    fn test_render_aligns_wide_characters() {
        let films = vec![film("東京物語", "Ozu", 2), film("Ran", "Kurosawa", 1)];
        let table = render_table(&films, plain(None));
        let lines: Vec<&str> = table.lines().collect();

        let director_col = |line: &str| {
            let byte = line.find(|c: char| c == 'O' || c == 'K').unwrap();
            line[..byte].width()
        };
        assert_eq!(director_col(lines[3]), director_col(lines[4]));
    }

    #[test]
    fn test_render_truncates() {
        let films = vec![film("A Very Long Title Indeed", "Someone", 3)];
        let table = render_table(&films, plain(Some(6)));
        assert!(table.contains("A Very "));
        assert!(!table.contains("A Very L"));
    }
}
