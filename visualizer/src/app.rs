use crate::chart::DelayChart;
use crate::legend::{Legend, LegendEntry};
use crate::model::PlotModel;
use crate::settings::PlotSettings;
use iced::{
    widget::{
        button,
        canvas::{Cache, Canvas},
        column, row, scrollable, text, Column, Container,
    },
    Alignment, Element, Length, Size, Task, Theme,
};
use log::{debug, info};

/// Failure to bring up the interactive window.
#[derive(thiserror::Error, Debug)]
pub enum DisplayError {
    #[error("display surface unavailable: {0}")]
    Unavailable(#[from] iced::Error),
}

/// Opens the chart window and blocks until the user closes it.
pub fn render(model: PlotModel, settings: PlotSettings) -> Result<(), DisplayError> {
    let window = Size::new(settings.window_width, settings.window_height);
    info!(
        "opening chart: {} lines over {} samples",
        model.lines.len(),
        model.sample_count
    );

    iced::application(
        move || Presenter::boot(model.clone(), settings.clone()),
        Presenter::update,
        Presenter::view,
    )
    .title(application_title)
    .theme(application_theme)
    .window_size(window)
    .run()?;

    info!("chart window closed");
    Ok(())
}

fn application_title(state: &Presenter) -> String {
    state.model.window_title()
}

fn application_theme(state: &Presenter) -> Theme {
    if state.settings.dark_theme {
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleLine(crate::model::LineId),
}

struct Presenter {
    model: PlotModel,
    legend: Legend,
    settings: PlotSettings,
    lines: Cache,
}

impl Presenter {
    fn boot(model: PlotModel, settings: PlotSettings) -> (Self, Task<Message>) {
        let legend = Legend::new(&model.lines, settings.dimmed_alpha);
        (
            Presenter {
                model,
                legend,
                settings,
                lines: Cache::new(),
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleLine(id) => {
                if let Some(visible) = state.legend.toggle(id) {
                    debug!("line {:?} visible={}", id, visible);
                    state.lines.clear();
                }
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let chart = Canvas::new(DelayChart::new(
            &state.model,
            &state.legend,
            &state.settings,
            &state.lines,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        let legend_entries = state
            .legend
            .entries()
            .iter()
            .fold(Column::new().spacing(2), |col, entry| {
                col.push(state.legend_button(entry))
            });

        let legend_column = column![
            text("Legend").size(16),
            scrollable(legend_entries).height(Length::Fill),
            text(format!(
                "{}/{} lines shown",
                state.legend.visibility().visible_count(),
                state.legend.visibility().len()
            ))
            .size(12),
        ]
        .spacing(8)
        .width(Length::Fixed(220.0));

        let body = row![chart, legend_column]
            .spacing(12)
            .align_y(Alignment::Start)
            .height(Length::Fill);

        let layout = column![
            text(state.model.chart_title()).size(16),
            body,
            text(format!(
                "{} samples; click a legend entry to show or hide its line",
                state.model.sample_count
            ))
            .size(12),
        ]
        .spacing(8)
        .padding(12);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn legend_button<'a>(&'a self, entry: &'a LegendEntry) -> Element<'a, Message> {
        let opacity = self.legend.opacity(entry.line);
        let (glyph, mut color) = match self.model.line(entry.line) {
            Some(line) if line.style.dashed => ("╌╌", line.style.color),
            Some(line) => ("──", line.style.color),
            None => ("──", iced::Color::WHITE),
        };
        color.a = opacity;
        let mut caption = if self.settings.dark_theme {
            iced::Color::WHITE
        } else {
            iced::Color::BLACK
        };
        caption.a = opacity;

        button(
            row![
                text(glyph).color(color).size(14),
                text(&entry.label).color(caption).size(13),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .style(button::text)
        .padding(4)
        .on_press(Message::ToggleLine(entry.line))
        .into()
    }
}
