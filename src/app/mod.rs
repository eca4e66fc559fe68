//! Viewer application and event handling

pub mod input;
pub mod state;

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::config::progress::{ProgressStore, now_timestamp};
use crate::course::Course;
use crate::track::LearningTrack;
use crate::ui;
use crate::ui::curriculum::{TrackRow, visible_rows};
use input::Action;
use state::{AppState, Panel};

/// Build a session whose completions are seeded from and written back to `store`
///
/// Each newly completed lesson is recorded and the store is saved to `path`
/// immediately. Save failures are logged, not propagated: the session keeps
/// working even if the disk doesn't.
pub fn persistent_track(
    course: &Course,
    store: Rc<RefCell<ProgressStore>>,
    path: PathBuf,
) -> LearningTrack {
    let completions = store.borrow().completions_for(&course.id);
    let mut track = LearningTrack::with_completions(course, completions);

    let course_id = course.id.clone();
    track.on_lesson_complete(move |module_id, lesson_id| {
        let mut store = store.borrow_mut();
        store.record_completion(&course_id, lesson_id, now_timestamp());
        match store.save_to(&path) {
            Ok(()) => tracing::info!("Saved completion of {} ({})", lesson_id, module_id),
            Err(e) => tracing::error!("Failed to save progress: {:#}", e),
        }
    });
    track.on_lesson_start(|module_id, lesson_id| {
        tracing::info!("Started lesson {} in module {}", lesson_id, module_id);
    });

    track
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance for a course
    pub fn new(config: Config, course: Course, track: LearningTrack) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state: AppState::new(course, track), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    ///
    /// Events are handled one at a time; each runs to completion before the
    /// next frame is drawn.
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();

        loop {
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &theme);
            })?;

            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let Some(action) =
                        input::key_to_action(key.code, key.modifiers, self.config.vim_mode)
                    else {
                        continue;
                    };
                    if apply_action(&mut self.state, action) {
                        break;
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Apply an action to the viewer state. Returns true if the app should exit.
///
/// Tree actions only move the cursor while the curriculum has focus, since
/// the highlight is hidden otherwise.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    if state.focused_panel == Panel::Lesson && action.targets_tree() {
        return false;
    }

    let rows = visible_rows(&state.course, &state.track);
    let highlighted = rows.get(state.curriculum.selected_index).copied();

    match action {
        Action::Quit => return true,
        Action::Up => {
            state.curriculum.selected_index = state.curriculum.selected_index.saturating_sub(1);
        }
        Action::Down => {
            if state.curriculum.selected_index + 1 < rows.len() {
                state.curriculum.selected_index += 1;
            }
        }
        Action::Top => state.curriculum.selected_index = 0,
        Action::Bottom => state.curriculum.selected_index = rows.len().saturating_sub(1),
        Action::SwitchPanel => {
            state.focused_panel = match state.focused_panel {
                Panel::Curriculum => Panel::Lesson,
                Panel::Lesson => Panel::Curriculum,
            };
        }
        Action::Select => match highlighted {
            Some(TrackRow::Module(m)) => toggle_module(state, m),
            Some(TrackRow::Lesson(m, l)) => {
                let module = &state.course.modules[m];
                let lesson = &module.lessons[l];
                let (module_id, lesson_id) = (module.id.clone(), lesson.id.clone());
                state.status.set_message(format!("Started: {}", lesson.title));
                state.track.select_lesson(&module_id, &lesson_id);
            }
            None => {}
        },
        Action::ToggleModule => match highlighted {
            Some(TrackRow::Module(m)) => toggle_module(state, m),
            Some(TrackRow::Lesson(m, _)) => collapse_to_module(state, m),
            None => {}
        },
        Action::Collapse => match highlighted {
            Some(TrackRow::Module(m)) => {
                if state.track.is_expanded(&state.course.modules[m].id) {
                    toggle_module(state, m);
                }
            }
            Some(TrackRow::Lesson(m, _)) => collapse_to_module(state, m),
            None => {}
        },
        Action::MarkComplete => mark_current_complete(state),
    }

    let row_count = visible_rows(&state.course, &state.track).len();
    state.curriculum.clamp(row_count);
    false
}

fn toggle_module(state: &mut AppState, module_idx: usize) {
    let module_id = state.course.modules[module_idx].id.clone();
    state.track.toggle_module_expanded(&module_id);
}

/// Collapse a module and move the cursor onto its header row
fn collapse_to_module(state: &mut AppState, module_idx: usize) {
    toggle_module(state, module_idx);
    let rows = visible_rows(&state.course, &state.track);
    if let Some(pos) = rows.iter().position(|r| *r == TrackRow::Module(module_idx)) {
        state.curriculum.selected_index = pos;
    }
}

fn mark_current_complete(state: &mut AppState) {
    let Some(lesson) = state.track.resolve_current_lesson(&state.course) else {
        state.status.set_error("Select a lesson first");
        return;
    };
    if state.track.is_complete(&lesson.id) {
        let msg = format!("Already completed: {}", lesson.title);
        state.status.set_message(msg);
        return;
    }
    let msg = format!("Completed: {}", lesson.title);
    state.track.complete_current(&state.course);
    state.status.set_message(msg);
}
