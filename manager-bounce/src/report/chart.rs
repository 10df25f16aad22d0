//! Bounce vs non-bounce bar chart.
//!
//! Two bars, one per group. The group with the higher PPG is drawn green
//! and the other red; both are yellow when tied. Each bar carries its PPG
//! above it and its match count inside it, and the subtitle states the
//! significance verdict.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use super::ReportError;
use crate::metrics::{Leader, PpgComparison};

/// Title used for the pooled report.
pub const OVERALL_TITLE: &str = "New Manager Bounce vs Non-Bounce";

const CHART_SIZE: (u32, u32) = (720, 540);
const BAR_OPACITY: f64 = 0.7;
const FONT: &str = "sans-serif";

/// Chart title for a single team.
pub fn team_title(team: &str) -> String {
    format!("{} {}", team, OVERALL_TITLE)
}

/// Bar colors for (bounce, non-bounce).
pub fn bar_colors(leader: Leader) -> [RGBColor; 2] {
    match leader {
        Leader::Bounce => [GREEN, RED],
        Leader::NonBounce => [RED, GREEN],
        Leader::Tied => [YELLOW, YELLOW],
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Drawing(e.to_string())
}

/// Render the comparison chart as an SVG file.
pub fn render_comparison(path: &Path, title: &str, cmp: &PpgComparison) -> Result<(), ReportError> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let root = root
        .titled(title, (FONT, 24.0).into_font())
        .map_err(draw_err)?;
    let (subtitle_area, plot_area) = root.split_vertically(30);

    let (width, _) = subtitle_area.dim_in_pixel();
    let subtitle_style = TextStyle::from((FONT, 14.0).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Top));
    subtitle_area
        .draw_text(&cmp.headline(), &subtitle_style, (width as i32 / 2, 4))
        .map_err(draw_err)?;

    let tallest = cmp.ppg_bounce.max(cmp.ppg_non_bounce);
    let y_max = if tallest > 0.0 { tallest * 1.2 } else { 1.0 };

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..1u32).into_segmented(), 0f64..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("PPG")
        .x_labels(2)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(0) => "Bounce".to_string(),
            SegmentValue::CenterOf(1) => "Non-Bounce".to_string(),
            _ => String::new(),
        })
        .draw()
        .map_err(draw_err)?;

    let groups = [
        (cmp.ppg_bounce, cmp.n_bounce),
        (cmp.ppg_non_bounce, cmp.n_non_bounce),
    ];
    let colors = bar_colors(cmp.leader());

    chart
        .draw_series(groups.iter().zip(colors.iter()).enumerate().map(
            |(i, (&(ppg, _), color))| {
                let i = i as u32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), ppg)],
                    color.mix(BAR_OPACITY).filled(),
                );
                bar.set_margin(0, 0, 30, 30);
                bar
            },
        ))
        .map_err(draw_err)?;

    let above = TextStyle::from((FONT, 14.0).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let inside = TextStyle::from((FONT, 14.0).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Center));

    chart
        .draw_series(groups.iter().enumerate().flat_map(|(i, &(ppg, n))| {
            let x = SegmentValue::CenterOf(i as u32);
            [
                Text::new(format!("{:.3}", ppg), (x.clone(), ppg), above.clone()),
                Text::new(format!("N_matches={}", n), (x, ppg / 2.0), inside.clone()),
            ]
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TTestResult;

    fn comparison(ppg_bounce: f64, ppg_non_bounce: f64) -> PpgComparison {
        PpgComparison {
            ppg_bounce,
            ppg_non_bounce,
            n_bounce: 40,
            n_non_bounce: 188,
            test: TTestResult {
                t_statistic: 0.42,
                p_value: 0.3371,
                degrees_of_freedom: 226.0,
            },
            alpha: 0.05,
        }
    }

    #[test]
    fn test_bar_colors() {
        assert_eq!(bar_colors(Leader::Bounce), [GREEN, RED]);
        assert_eq!(bar_colors(Leader::NonBounce), [RED, GREEN]);
        assert_eq!(bar_colors(Leader::Tied), [YELLOW, YELLOW]);
    }

    #[test]
    fn test_team_title() {
        assert_eq!(team_title("Chelsea"), "Chelsea New Manager Bounce vs Non-Bounce");
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overall_bounce.svg");

        render_comparison(&path, OVERALL_TITLE, &comparison(1.35, 1.21)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("N_matches=40"));
        assert!(svg.contains("N_matches=188"));
        assert!(svg.contains("1.350"));
    }

    #[test]
    fn test_match_count_label_is_bold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.svg");
        render_comparison(&path, OVERALL_TITLE, &comparison(1.35, 1.21)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        for label in ["N_matches=40", "N_matches=188"] {
            let at = svg.find(label).unwrap();
            let tag_start = svg[..at].rfind("<text").unwrap();
            assert!(svg[tag_start..at].contains(r#"font-weight="bold""#));
        }

        let ppg_at = svg.find("1.350").unwrap();
        let ppg_tag = svg[..ppg_at].rfind("<text").unwrap();
        assert!(!svg[ppg_tag..ppg_at].contains("font-weight"));
    }

    #[test]
    fn test_render_zero_ppg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.svg");
        render_comparison(&path, "Flat", &comparison(0.0, 0.0)).unwrap();
        assert!(path.exists());
    }
}
