//! Horizontal text bar chart for the release year histogram.

use moviedash_models::YearHistogram;

const BAR: &str = "█";

/// One chart row: a year, its count and the bar length in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRow {
    pub year: i32,
    pub count: usize,
    pub cells: usize,
}

/// Rows in ascending year order, scaled so the largest count spans `width`
/// cells. Non-zero counts always get at least one cell.
pub fn bar_rows(histogram: &YearHistogram, width: usize) -> Vec<BarRow> {
    let max = histogram.max_count();
    if max == 0 || width == 0 {
        return Vec::new();
    }

    histogram
        .sorted_by_year()
        .into_iter()
        .map(|yc| {
            let scaled = (yc.count as f64 / max as f64 * width as f64).round() as usize;
            let cells = if yc.count > 0 { scaled.max(1) } else { 0 };
            BarRow {
                year: yc.year,
                count: yc.count,
                cells,
            }
        })
        .collect()
}

/// Render rows as `year │████ count` lines, without colors
pub fn render_rows(rows: &[BarRow]) -> Vec<String> {
    let year_width = rows
        .iter()
        .map(|row| row.year.to_string().len())
        .max()
        .unwrap_or(4);

    rows.iter()
        .map(|row| {
            format!(
                "{:>year_width$} │{} {}",
                row.year,
                BAR.repeat(row.cells),
                row.count,
                year_width = year_width
            )
        })
        .collect()
}

pub fn render_bar_chart(histogram: &YearHistogram, width: usize) -> Vec<String> {
    render_rows(&bar_rows(histogram, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram_renders_nothing() {
        assert!(render_bar_chart(&YearHistogram::new(), 40).is_empty());
    }

    #[test]
    fn test_rows_sorted_by_year() {
        let histogram: YearHistogram = [2010, 1999, 2010, 2005].into_iter().collect();
        let years: Vec<i32> = bar_rows(&histogram, 10).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1999, 2005, 2010]);
    }

    #[test]
    fn test_longest_bar_fills_width() {
        let histogram: YearHistogram = [2000, 2000, 2000, 2000, 2001, 2001].into_iter().collect();
        let rows = bar_rows(&histogram, 20);
        assert_eq!(rows[0], BarRow { year: 2000, count: 4, cells: 20 });
        assert_eq!(rows[1], BarRow { year: 2001, count: 2, cells: 10 });
    }

    #[test]
    fn test_small_counts_get_one_cell() {
        let mut years = vec![1990; 100];
        years.push(1991);
        let histogram: YearHistogram = years.into_iter().collect();
        let rows = bar_rows(&histogram, 10);
        assert_eq!(rows[0].cells, 10);
        assert_eq!(rows[1].cells, 1);
    }

    #[test]
    fn test_render_rows_format() {
        let histogram: YearHistogram = [2020, 2020, 2021].into_iter().collect();
        let lines = render_bar_chart(&histogram, 4);
        assert_eq!(lines, vec!["2020 │████ 2".to_string(), "2021 │██ 1".to_string()]);
    }

    #[test]
    fn test_year_column_is_right_aligned() {
        let histogram: YearHistogram = [999, 2001].into_iter().collect();
        let lines = render_bar_chart(&histogram, 1);
        assert_eq!(lines[0], " 999 │█ 1");
        assert_eq!(lines[1], "2001 │█ 1");
    }
}
