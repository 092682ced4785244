use crate::app::Message;
use crate::format::EngFormatter;
use crate::legend::Legend;
use crate::model::{delay_axis_color, jitter_axis_color, PlotLine, PlotModel};
use crate::scale::{decimate, nice_ticks, Viewport, YAxis};
use crate::settings::PlotSettings;
use iced::{
    mouse,
    widget::canvas::{self, Cache, Event, Frame, Geometry, LineDash, Path, Stroke, Text},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};

const MARGIN_LEFT: f32 = 78.0;
const MARGIN_RIGHT: f32 = 78.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_BOTTOM: f32 = 44.0;
const LABEL_SIZE: f32 = 11.0;
static DASH: [f32; 2] = [4.0, 3.0];

/// Dual-axis delay/jitter chart drawn on an iced canvas.
pub struct DelayChart<'a> {
    model: &'a PlotModel,
    legend: &'a Legend,
    settings: &'a PlotSettings,
    cache: &'a Cache,
}

/// Last pointer position seen inside the canvas.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    cursor: Option<Point>,
}

impl<'a> DelayChart<'a> {
    pub fn new(
        model: &'a PlotModel,
        legend: &'a Legend,
        settings: &'a PlotSettings,
        cache: &'a Cache,
    ) -> Self {
        Self {
            model,
            legend,
            settings,
            cache,
        }
    }

    fn viewport(&self, size: Size) -> Viewport {
        Viewport {
            area: Rectangle {
                x: MARGIN_LEFT,
                y: MARGIN_TOP,
                width: (size.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
                height: (size.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            },
            index: self.model.index_range,
            delay: self.model.delay_range,
            jitter: self.model.jitter_range,
            sample_count: self.model.sample_count,
        }
    }

    fn palette(&self) -> (Color, Color, Color) {
        if self.settings.dark_theme {
            (
                Color::from_rgb(0.05, 0.05, 0.05),
                Color::from_rgb(0.22, 0.22, 0.26),
                Color::from_rgb(0.8, 0.8, 0.82),
            )
        } else {
            (
                Color::WHITE,
                Color::from_rgb(0.86, 0.86, 0.86),
                Color::from_rgb(0.15, 0.15, 0.15),
            )
        }
    }

    fn draw_axes(&self, frame: &mut Frame, view: &Viewport) {
        let (background, grid, foreground) = self.palette();
        frame.fill_rectangle(Point::ORIGIN, frame.size(), background);

        let area = view.area;
        let grid_stroke = || Stroke::default().with_width(1.0).with_color(grid);
        let samples = EngFormatter::count();
        let nanoseconds = EngFormatter::nanoseconds();

        for tick in nice_ticks(view.index, self.settings.max_ticks) {
            let x = view.x_of(tick);
            frame.stroke(
                &Path::line(Point::new(x, area.y), Point::new(x, area.y + area.height)),
                grid_stroke(),
            );
            frame.fill_text(label(
                samples.format(tick),
                Point::new(x - 8.0, area.y + area.height + 6.0),
                foreground,
            ));
        }

        for tick in nice_ticks(view.delay, self.settings.max_ticks) {
            let y = view.y_of(YAxis::Delay, tick);
            frame.stroke(
                &Path::line(Point::new(area.x, y), Point::new(area.x + area.width, y)),
                grid_stroke(),
            );
            frame.fill_text(label(
                nanoseconds.format(tick),
                Point::new(4.0, y - LABEL_SIZE / 2.0),
                delay_axis_color(),
            ));
        }

        for tick in nice_ticks(view.jitter, self.settings.max_ticks) {
            let y = view.y_of(YAxis::Jitter, tick);
            frame.fill_text(label(
                nanoseconds.format(tick),
                Point::new(area.x + area.width + 6.0, y - LABEL_SIZE / 2.0),
                jitter_axis_color(),
            ));
        }

        frame.stroke(
            &Path::rectangle(Point::new(area.x, area.y), Size::new(area.width, area.height)),
            Stroke::default().with_width(1.0).with_color(foreground),
        );

        frame.fill_text(label(
            self.model.delay_axis_label(),
            Point::new(4.0, 6.0),
            delay_axis_color(),
        ));
        frame.fill_text(label(
            self.model.jitter_axis_label(),
            Point::new(area.x + area.width / 2.0, 6.0),
            jitter_axis_color(),
        ));
        frame.fill_text(label(
            "samples #".to_string(),
            Point::new(area.x + area.width / 2.0 - 24.0, area.y + area.height + 24.0),
            foreground,
        ));
    }

    fn draw_line(&self, frame: &mut Frame, view: &Viewport, line: &PlotLine) {
        let values = line.values.to_vec();
        let points = decimate(&values, view.area.width as usize);
        if points.is_empty() {
            return;
        }

        let screen: Vec<Point> = points
            .iter()
            .map(|&(index, value)| view.to_screen(line.axis, index as f64, value as f64))
            .collect();

        let path = Path::new(|builder| {
            for (i, point) in screen.iter().enumerate() {
                if i == 0 {
                    builder.move_to(*point);
                } else {
                    builder.line_to(*point);
                }
            }
        });

        let mut stroke = Stroke::default()
            .with_width(line.style.width)
            .with_color(line.style.color);
        if line.style.dashed {
            stroke.line_dash = LineDash {
                segments: &DASH,
                offset: 0,
            };
        }
        frame.stroke(&path, stroke);

        if let Some(marker) = line.style.marker {
            if screen.len() <= self.settings.marker_limit {
                for point in &screen {
                    frame.fill_rectangle(
                        Point::new(point.x - marker / 2.0, point.y - marker / 2.0),
                        Size::new(marker, marker),
                        line.style.color,
                    );
                }
            }
        }
    }

    fn draw_readout(&self, frame: &mut Frame, view: &Viewport, cursor: Point) {
        let Some(readout) = view.readout(cursor) else {
            return;
        };
        let (_, _, foreground) = self.palette();
        let faint = Color {
            a: 0.35,
            ..foreground
        };
        let area = view.area;

        let crosshair = Path::new(|builder| {
            builder.move_to(Point::new(cursor.x, area.y));
            builder.line_to(Point::new(cursor.x, area.y + area.height));
            builder.move_to(Point::new(area.x, cursor.y));
            builder.line_to(Point::new(area.x + area.width, cursor.y));
        });
        frame.stroke(&crosshair, Stroke::default().with_width(1.0).with_color(faint));
        frame.fill_text(label(
            readout.to_string(),
            Point::new(area.x + 6.0, area.y + 6.0),
            foreground,
        ));
    }
}

fn label(content: String, position: Point, color: Color) -> Text {
    Text {
        content,
        position,
        color,
        size: Pixels(LABEL_SIZE),
        ..Text::default()
    }
}

impl canvas::Program<Message> for DelayChart<'_> {
    type State = ChartInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = cursor.position_in(bounds);
                if position != interaction.cursor {
                    interaction.cursor = position;
                    Some(canvas::Action::request_redraw())
                } else {
                    None
                }
            }
            Event::Mouse(mouse::Event::CursorLeft) => {
                interaction.cursor.take()?;
                Some(canvas::Action::request_redraw())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let view = self.viewport(bounds.size());

        let lines = self.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_axes(frame, &view);
            for line in &self.model.lines {
                if self.legend.is_visible(line.id) {
                    self.draw_line(frame, &view, line);
                }
            }
        });

        let mut overlay = Frame::new(renderer, bounds.size());
        if let Some(cursor) = interaction.cursor {
            self.draw_readout(&mut overlay, &view, cursor);
        }

        vec![lines, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.viewport(bounds.size()).area.contains(position) => {
                mouse::Interaction::Crosshair
            }
            _ => mouse::Interaction::default(),
        }
    }
}
