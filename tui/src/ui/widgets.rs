use housing::{features::bounds, AppContext, Column, Histogram, TablePreview, TrainedModel};
use ratatui::{
    layout::{Alignment, Constraint},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Cell, Paragraph, Row, Sparkline, Table, Wrap,
    },
};

use crate::{
    state::{
        events::{EventLog, Level},
        explorer::{ExplorerState, Handle},
        form::{FormState, Outcome, Slot},
    },
    ui::theme::Theme,
};

const BAR_WIDTH: usize = 14;

fn panel(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border(focused))
        .title(Span::styled(title, Theme::title()))
}

pub fn header(ctx: &AppContext) -> Paragraph<'static> {
    let model = ctx.model();
    let params = model.params();

    let line1 = Line::from(vec![
        Span::styled("Boston House Price Prediction", Theme::title()),
        Span::styled("  |  ", Theme::muted()),
        Span::styled(
            "Explore the housing data and predict a home's value from its attributes.",
            Theme::dim(),
        ),
    ]);

    let line2 = Line::from(Span::styled(
        format!(
            "{} rows  |  random forest: {} trees, depth {}, {} features per split  |  seed {}",
            ctx.dataset().len(),
            params.n_trees,
            params.max_depth,
            params.max_features,
            model.seed()
        ),
        Theme::dim(),
    ));

    Paragraph::new(vec![line1, line2])
        .block(panel("Overview", false))
        .wrap(Wrap { trim: true })
}

pub fn column_picker(state: &ExplorerState, focused: bool) -> Paragraph<'static> {
    let spans = Column::ALL
        .into_iter()
        .flat_map(|column| {
            let mark = if state.is_selected(column) { "[x]" } else { "[ ]" };
            let style = if focused && state.cursor() == column {
                Theme::cursor()
            } else if state.is_selected(column) {
                Theme::selected()
            } else {
                Theme::muted()
            };
            [
                Span::styled(format!("{mark} {}", column.name()), style),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).block(panel("Features", focused))
}

pub fn preview_table(preview: &TablePreview) -> Table<'static> {
    let header = Row::new(
        preview
            .headers
            .iter()
            .map(|h| Cell::from(*h))
            .collect::<Vec<_>>(),
    )
    .style(Theme::title());

    let rows = preview.rows.iter().map(|row| {
        Row::new(
            row.iter()
                .map(|v| Cell::from(v.to_string()))
                .collect::<Vec<_>>(),
        )
        .style(Theme::text())
    });

    let widths = preview
        .headers
        .iter()
        .map(|_| Constraint::Length(9))
        .collect::<Vec<_>>();

    Table::new(rows, widths)
        .header(header)
        .block(panel("First 10 rows", false))
}

pub fn range_control(state: &ExplorerState, focused: bool) -> Paragraph<'static> {
    let range = state.range();
    let handle_style = |h: Handle| {
        if focused && state.handle() == h {
            Theme::cursor()
        } else {
            Theme::selected()
        }
    };

    let line = Line::from(vec![
        Span::styled(format!("{:.1}", range.floor()), Theme::muted()),
        Span::styled(" < ", Theme::muted()),
        Span::styled(format!(" {:.1} ", range.low()), handle_style(Handle::Low)),
        Span::styled(" .. ", Theme::dim()),
        Span::styled(format!(" {:.1} ", range.high()), handle_style(Handle::High)),
        Span::styled(" < ", Theme::muted()),
        Span::styled(format!("{:.1}", range.ceiling()), Theme::muted()),
    ]);

    Paragraph::new(line).block(panel("Price range (MEDV)", focused))
}

/// Sums runs of adjacent bins so that every bin lands in one of `width` columns.
///
/// Counts that already fit are returned as they are.
pub fn fit_counts(counts: &[u64], width: usize) -> Vec<u64> {
    if width == 0 || counts.len() <= width {
        return counts.to_vec();
    }

    let run = counts.len().div_ceil(width);
    counts.chunks(run).map(|c| c.iter().sum()).collect()
}

fn distribution_panel(in_range: usize) -> Block<'static> {
    panel("Price distribution", false).title(
        Title::from(Span::styled(
            format!("{in_range} homes in range"),
            Theme::muted(),
        ))
        .position(Position::Bottom)
        .alignment(Alignment::Center),
    )
}

/// Histogram bars with the bin range as axis labels.
///
/// `counts` must cover every bin of `histogram`, see [`fit_counts`].
pub fn histogram<'a>(histogram: &Histogram, counts: &'a [u64], in_range: usize) -> Sparkline<'a> {
    let (min, max) = histogram.range().unwrap_or_default();
    let peak = counts.iter().copied().max().unwrap_or(0);

    let block = distribution_panel(in_range)
        .title(
            Title::from(Span::styled(format!("{min:.1}"), Theme::dim()))
                .position(Position::Bottom)
                .alignment(Alignment::Left),
        )
        .title(
            Title::from(Span::styled(format!("{max:.1}"), Theme::dim()))
                .position(Position::Bottom)
                .alignment(Alignment::Right),
        );

    Sparkline::default()
        .block(block)
        .data(counts)
        .max(peak.max(1))
        .style(Theme::data())
}

pub fn empty_histogram() -> Paragraph<'static> {
    Paragraph::new(Span::styled("No homes in the selected range.", Theme::muted()))
        .alignment(Alignment::Center)
        .block(distribution_panel(0))
}

pub fn form(form: &FormState, focused: bool) -> Paragraph<'static> {
    let mut lines = Column::FEATURES
        .into_iter()
        .enumerate()
        .map(|(i, column)| {
            let at_cursor = focused && form.cursor() == i;
            let invalid = form.value(column).is_err();

            let value_style = if at_cursor {
                Theme::cursor()
            } else if invalid {
                Theme::error()
            } else if form.is_edited(column) {
                Theme::text()
            } else {
                Theme::dim()
            };

            Line::from(vec![
                Span::styled(if at_cursor { "> " } else { "  " }, Theme::warn()),
                Span::styled(format!("{:<9}", column.name()), Theme::text()),
                Span::styled(format!(" {:<12} ", form.display(column)), value_style),
                Span::styled(if invalid { " !" } else { "" }, Theme::error()),
            ])
        })
        .collect::<Vec<_>>();

    let button = if focused && form.focused() == Slot::Predict {
        Theme::cursor()
    } else {
        Theme::selected()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  [ Predict ]", button)));
    lines.push(Line::from(Span::styled(hint(form), Theme::muted())));

    Paragraph::new(lines).block(panel("Home attributes", focused))
}

fn hint(form: &FormState) -> String {
    match form.focused() {
        Slot::Predict => "Enter or p to predict".into(),
        Slot::Field(column) => match bounds(column) {
            Some(range) => format!("{} ({} to {})", column.label(), range.start(), range.end()),
            None => format!("{} (space toggles)", column.label()),
        },
    }
}

pub fn prediction(form: &FormState) -> Paragraph<'static> {
    let result = match form.outcome() {
        Some(Outcome::Price(price)) => Span::styled(price.clone(), Theme::ok()),
        Some(Outcome::Rejected(e)) => Span::styled(e.to_string(), Theme::error()),
        None => Span::styled("Press Predict to estimate.", Theme::muted()),
    };

    Paragraph::new(vec![
        Line::from(Span::styled(
            "Predicted value for the selected attributes:",
            Theme::dim(),
        )),
        Line::from(result),
    ])
    .block(panel("Prediction", false))
    .wrap(Wrap { trim: true })
}

pub fn importances(model: &TrainedModel) -> Paragraph<'static> {
    let mut ranked = model.feature_importances();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let lines = ranked
        .into_iter()
        .map(|(column, weight)| {
            let filled = (weight.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
            Line::from(vec![
                Span::styled(format!("{:<8}", column.name()), Theme::text()),
                Span::styled(
                    format!("{:<width$}", "█".repeat(filled), width = BAR_WIDTH),
                    Theme::data(),
                ),
                Span::styled(format!(" {weight:.3}"), Theme::dim()),
            ])
        })
        .collect::<Vec<_>>();

    Paragraph::new(lines).block(panel("Feature importance", false))
}

pub fn events(log: &EventLog, n: usize) -> Paragraph<'static> {
    let lines = log
        .tail(n)
        .map(|l| {
            let style = match l.level {
                Level::Info => Theme::dim(),
                Level::Warn => Theme::warn(),
            };
            Line::from(vec![
                Span::styled(format!("[{}] ", l.level.as_str()), style),
                Span::styled(l.message.clone(), Theme::text()),
            ])
        })
        .collect::<Vec<_>>();

    Paragraph::new(lines)
        .block(panel("Events", false))
        .wrap(Wrap { trim: true })
}

pub fn footer(hints: &str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(hints.to_string(), Theme::muted()))
}
