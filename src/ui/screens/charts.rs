use crate::app::ChartData;
use crate::logic::stats::HumidityBand;
use crate::ui::{nav_bar, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
        Paragraph, Widget,
    },
};

pub struct ChartsScreen<'a> {
    pub data: &'a ChartData,
}

impl<'a> ChartsScreen<'a> {
    pub fn new(data: &'a ChartData) -> Self {
        Self { data }
    }

    /// Crop labels in alphabetical order. Colors are keyed on this index
    /// so a crop looks the same on both charts.
    fn crop_order(&self) -> Vec<&'a str> {
        let mut crops: Vec<&str> = self.data.crop_counts.iter().map(|(c, _)| c.as_str()).collect();
        crops.sort_unstable();
        crops
    }

    fn crop_color(&self, order: &[&str], crop: &str) -> Color {
        let index = order.iter().position(|c| *c == crop).unwrap_or(0);
        Theme::crop_color(index)
    }
}

fn band_marker(band: HumidityBand) -> Marker {
    match band {
        HumidityBand::Low => Marker::Braille,
        HumidityBand::Medium => Marker::Dot,
        HumidityBand::High => Marker::Block,
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::styled(format!("{:.0}", v), Theme::dim()))
        .collect()
}

impl Widget for ChartsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Charts
                Constraint::Length(1), // Marker legend
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Data Insights", Theme::title()),
            Span::styled(
                format!(" - {} crop(s) in the training data", self.data.crop_counts.len()),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        if self.data.crop_counts.is_empty() {
            Paragraph::new(Span::styled("No training data loaded", Theme::warning()))
                .render(chunks[1], buf);
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(chunks[1]);

            let order = self.crop_order();
            self.render_distribution(&order, columns[0], buf);
            self.render_scatter(&order, columns[1], buf);
        }

        let legend = Line::from(vec![
            Span::styled("Humidity: ", Theme::dim()),
            Span::styled("⠂ ", Theme::normal()),
            Span::styled(HumidityBand::Low.as_str(), Theme::dim()),
            Span::styled("  • ", Theme::normal()),
            Span::styled(HumidityBand::Medium.as_str(), Theme::dim()),
            Span::styled("  █ ", Theme::normal()),
            Span::styled(HumidityBand::High.as_str(), Theme::dim()),
        ]);
        Paragraph::new(legend).render(chunks[2], buf);

        let nav = nav_bar(&[("1", "Advisor"), ("2", "Ask"), ("3", "Charts"), ("q", "Quit")]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl ChartsScreen<'_> {
    fn render_distribution(&self, order: &[&str], area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = self
            .data
            .crop_counts
            .iter()
            .map(|(crop, count)| {
                let color = self.crop_color(order, crop);
                Bar::default()
                    .value(*count)
                    .label(Line::from(crop.as_str()))
                    .style(Style::default().fg(color))
                    .value_style(Theme::selected())
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .title("Crop Distribution")
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));

        chart.render(area, buf);
    }

    fn render_scatter(&self, order: &[&str], area: Rect, buf: &mut Buffer) {
        let mut named = Vec::new();
        let datasets: Vec<Dataset> = self
            .data
            .scatter
            .iter()
            .map(|series| {
                let color = self.crop_color(order, &series.crop);
                let dataset = Dataset::default()
                    .marker(band_marker(series.band))
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color))
                    .data(&series.points);

                // One legend entry per crop, not per band
                if named.contains(&series.crop.as_str()) {
                    dataset
                } else {
                    named.push(series.crop.as_str());
                    dataset.name(series.crop.clone())
                }
            })
            .collect();

        let temp = self.data.temperature_bounds;
        let rain = self.data.rainfall_bounds;

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title("Temperature vs Rainfall")
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled("Temperature (°C)", Theme::dim()))
                    .style(Theme::border())
                    .bounds(temp)
                    .labels(axis_labels(temp)),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Rainfall (mm)", Theme::dim()))
                    .style(Theme::border())
                    .bounds(rain)
                    .labels(axis_labels(rain)),
            )
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Percentage(40), Constraint::Percentage(60)));

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conditions, Dataset as TrainingData, TrainingExample};

    fn chart_data() -> ChartData {
        let data = TrainingData::new(vec![
            TrainingExample::new(Conditions::new(25.0, 85.0, 6.5, 220.0), "rice"),
            TrainingExample::new(Conditions::new(24.0, 82.0, 6.3, 240.0), "rice"),
            TrainingExample::new(Conditions::new(20.0, 50.0, 6.8, 70.0), "wheat"),
        ]);
        ChartData::from_dataset(&data)
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn crop_order_is_alphabetical() {
        let data = chart_data();
        let screen = ChartsScreen::new(&data);
        assert_eq!(screen.crop_order(), vec!["rice", "wheat"]);
    }

    #[test]
    fn renders_both_charts() {
        let data = chart_data();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        ChartsScreen::new(&data).render(area, &mut buf);

        let screen = text(&buf);
        assert!(screen.contains("Crop Distribution"));
        assert!(screen.contains("Temperature vs Rainfall"));
        assert!(screen.contains("wheat"));
    }

    #[test]
    fn empty_data_shows_notice() {
        let data = ChartData::from_dataset(&TrainingData::default());
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ChartsScreen::new(&data).render(area, &mut buf);
        assert!(text(&buf).contains("No training data loaded"));
    }
}
