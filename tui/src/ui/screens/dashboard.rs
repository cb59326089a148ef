use crossterm::event::KeyCode;
use housing::{AppContext, Column, FeatureDefaults};
use log::debug;
use ratatui::{widgets::Block, Frame};

use crate::{
    state::{
        events::EventLog,
        explorer::{ExplorerState, NUDGE_JUMP, NUDGE_STEP},
        form::{FormState, Slot},
    },
    ui::{layout, theme::Theme, widgets},
};

use super::{help, Action};

/// Panel receiving the keys that are not global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Columns,
    Range,
    Sidebar,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Columns => Focus::Range,
            Focus::Range => Focus::Sidebar,
            Focus::Sidebar => Focus::Columns,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Columns => Focus::Sidebar,
            Focus::Range => Focus::Columns,
            Focus::Sidebar => Focus::Range,
        }
    }

    fn hints(self) -> &'static str {
        match self {
            Focus::Columns => {
                " Tab panel | Left/Right move | Space toggle column | ? help | q quit"
            }
            Focus::Range => {
                " Tab panel | Left/Right nudge | PgUp/PgDn jump | Up/Down handle | ? help | q quit"
            }
            Focus::Sidebar => {
                " Tab panel | Up/Down field | type | Del default | p predict | ? help | q quit"
            }
        }
    }
}

/// The whole page: dataset explorer on the left, prediction sidebar on the right.
pub struct DashboardState {
    ctx: AppContext,
    focus: Focus,
    explorer: ExplorerState,
    form: FormState,
    events: EventLog,
    show_help: bool,
}

impl DashboardState {
    pub fn new(ctx: AppContext) -> Self {
        let explorer = ExplorerState::new(ctx.dataset());
        let form = FormState::new(FeatureDefaults::from_dataset(ctx.dataset()));

        let mut events = EventLog::new();
        events.info(format!(
            "model ready: {} trees on {} rows (seed {})",
            ctx.model().params().n_trees,
            ctx.model().rows(),
            ctx.model().seed()
        ));

        Self {
            ctx,
            focus: Focus::Columns,
            explorer,
            form,
            events,
            show_help: false,
        }
    }

    fn predict(&mut self) {
        match self.form.submit(self.ctx.model()) {
            Ok(price) => self.events.info(format!("predicted {price}")),
            Err(e) => self.events.warn(format!("prediction rejected: {e}")),
        }
    }
}

pub fn handle_key(state: &mut DashboardState, key: KeyCode) -> Action {
    if state.show_help {
        if key == KeyCode::Char('q') {
            return Action::Quit;
        }
        state.show_help = false;
        return Action::None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::BackTab => state.focus = state.focus.prev(),
        _ => match state.focus {
            Focus::Columns => columns_key(state, key),
            Focus::Range => range_key(state, key),
            Focus::Sidebar => sidebar_key(state, key),
        },
    }

    Action::None
}

fn columns_key(state: &mut DashboardState, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => state.explorer.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => state.explorer.move_cursor(1),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let column = state.explorer.cursor();
            let shown = state.explorer.toggle();
            debug!(
                "column {} {}",
                column.name(),
                if shown { "shown" } else { "hidden" }
            );
        }
        _ => {}
    }
}

fn range_key(state: &mut DashboardState, key: KeyCode) {
    let delta = match key {
        KeyCode::Left | KeyCode::Char('h') => -NUDGE_STEP,
        KeyCode::Right | KeyCode::Char('l') => NUDGE_STEP,
        KeyCode::PageDown => -NUDGE_JUMP,
        KeyCode::PageUp => NUDGE_JUMP,
        KeyCode::Up | KeyCode::Down => {
            state.explorer.switch_handle();
            return;
        }
        _ => return,
    };

    state.explorer.nudge(delta);
    let range = state.explorer.range();
    debug!("price range {:.1}..{:.1}", range.low(), range.high());
}

fn sidebar_key(state: &mut DashboardState, key: KeyCode) {
    match (key, state.form.focused()) {
        (KeyCode::Char('p'), _) | (KeyCode::Enter, Slot::Predict) => state.predict(),
        (KeyCode::Up, _) => state.form.move_cursor(-1),
        (KeyCode::Down, _) => state.form.move_cursor(1),
        (
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right,
            Slot::Field(Column::Chas),
        ) => state.form.toggle_river(),
        (KeyCode::Enter, Slot::Field(_)) => state.form.move_cursor(1),
        (KeyCode::Char(c), Slot::Field(_)) => {
            state.form.input(c);
        }
        (KeyCode::Backspace, Slot::Field(_)) => {
            state.form.backspace();
        }
        (KeyCode::Delete, Slot::Field(_)) => {
            state.form.reset_field();
        }
        _ => {}
    }
}

pub fn draw(f: &mut Frame, state: &DashboardState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let page = layout::page(area);
    let view = state.explorer.view(state.ctx.dataset());

    f.render_widget(widgets::header(&state.ctx), page.header);
    f.render_widget(
        widgets::column_picker(&state.explorer, state.focus == Focus::Columns),
        page.columns,
    );
    f.render_widget(widgets::preview_table(&view.preview), page.table);
    f.render_widget(
        widgets::range_control(&state.explorer, state.focus == Focus::Range),
        page.range,
    );

    if view.histogram.is_empty() {
        f.render_widget(widgets::empty_histogram(), page.histogram);
    } else {
        let columns = page.histogram.width.saturating_sub(2) as usize;
        let counts = widgets::fit_counts(&view.histogram.counts(), columns);
        f.render_widget(
            widgets::histogram(&view.histogram, &counts, view.in_range),
            page.histogram,
        );
    }

    f.render_widget(
        widgets::form(&state.form, state.focus == Focus::Sidebar),
        page.form,
    );
    f.render_widget(widgets::prediction(&state.form), page.prediction);
    f.render_widget(widgets::importances(state.ctx.model()), page.importances);

    let visible = page.events.height.saturating_sub(2) as usize;
    f.render_widget(widgets::events(&state.events, visible), page.events);
    f.render_widget(widgets::footer(state.focus.hints()), page.footer);

    if state.show_help {
        help::draw(f, area);
    }
}
