use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Frame, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState, Tabs}, layout::{Alignment, Layout, Constraint, Direction, Rect}, style::{Style, Modifier, Color}, text::{Line, Span}};
use tokio::sync::watch;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use planner::{
    application::planner::Planner,
    config::Config,
    domain::{event::EventKind, storage::KeyValueStore, task::{Priority, TaskKind}, timer::{CountdownTimer, Phase}},
    infrastructure::sqlite_kv::SqliteKvStore,
    view::{self, form::{EventDraft, FormError, TaskDraft}, DashboardView, EventRow, TaskRow, TimerFace},
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    init_tracing(&config)?;

    let kv = SqliteKvStore::connect(&config.database_url).await?;
    let planner = Planner::open(kv).await?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, planner, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn init_tracing(config: &Config) -> Result<()> {
    // stdout belongs to the UI, so logs go to a file
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| "info".into()))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab { Dashboard, Tasks, Schedule, Timer }

impl Tab {
    const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Tasks, Tab::Schedule, Tab::Timer];

    fn title(self) -> &'static str {
        match self { Tab::Dashboard => "1 Dashboard", Tab::Tasks => "2 Tasks", Tab::Schedule => "3 Schedule", Tab::Timer => "4 Timer" }
    }

    fn index(self) -> usize { Self::ALL.iter().position(|t| *t == self).unwrap_or(0) }

    fn shifted(self, by: usize) -> Self { Self::ALL[(self.index() + by) % Self::ALL.len()] }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, NewTask, NewEvent }

const TASK_FIELDS: [&str; 5] = ["Title", "Subject", "Due (YYYY-MM-DD)", "Priority (low/medium/high)", "Type (assignment/exam/project/reading)"];
const EVENT_FIELDS: [&str; 5] = ["Title", "Date (YYYY-MM-DD)", "Start (HH:MM)", "End (HH:MM)", "Type (class/study/personal)"];

/// Draft values for the active form, one per field label.
struct Form {
    labels: &'static [&'static str],
    values: Vec<String>,
    field: usize,
}

impl Form {
    fn task() -> Self {
        Self { labels: &TASK_FIELDS, values: vec![String::new(), String::new(), String::new(), Priority::default().label().into(), TaskKind::default().label().into()], field: 0 }
    }

    fn event(today: NaiveDate) -> Self {
        Self { labels: &EVENT_FIELDS, values: vec![String::new(), today.to_string(), String::new(), String::new(), EventKind::default().label().into()], field: 0 }
    }

    fn value(&self, i: usize) -> &str { self.values.get(i).map(|v| v.trim()).unwrap_or("") }

    fn active(&mut self) -> &mut String { &mut self.values[self.field] }

    fn task_draft(&self) -> TaskDraft<'_> {
        TaskDraft { title: self.value(0), subject: self.value(1), due_date: self.value(2), priority: self.value(3), kind: self.value(4) }
    }

    fn event_draft(&self) -> EventDraft<'_> {
        EventDraft { title: self.value(0), date: self.value(1), start_time: self.value(2), end_time: self.value(3), kind: self.value(4) }
    }
}

struct App<S: KeyValueStore + Clone> {
    planner: Planner<S>,
    tab: Tab,
    mode: Mode,
    form: Form,
    tasks_state: ListState,
    events_state: ListState,
    timer_rx: watch::Receiver<CountdownTimer>,
    last_phase: Phase,
    status: String,
    last_tick: Instant,
}

impl<S: KeyValueStore + Clone> App<S> {
    fn today(&self) -> NaiveDate { Local::now().date_naive() }

    fn clamp_selection(state: &mut ListState, len: usize) {
        match state.selected() {
            _ if len == 0 => state.select(None),
            None => state.select(Some(0)),
            Some(i) if i >= len => state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    fn move_selection(&mut self, down: bool) {
        let (state, len) = match self.tab {
            Tab::Tasks => (&mut self.tasks_state, self.planner.tasks.list_tasks().len()),
            Tab::Schedule => (&mut self.events_state, self.planner.schedule.list_events().len()),
            _ => return,
        };
        let current = state.selected().unwrap_or(0);
        let next = if down { (current + 1).min(len.saturating_sub(1)) } else { current.saturating_sub(1) };
        state.select(if len == 0 { None } else { Some(next) });
    }

    fn report<T>(&mut self, what: &str, res: Result<T>) -> Option<T> {
        match res {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "{what} failed");
                self.status = format!("{what} failed: {e}");
                None
            }
        }
    }

    async fn toggle_selected_task(&mut self) {
        let Some(id) = self.tasks_state.selected().and_then(|i| self.planner.tasks.list_tasks().get(i)).map(|t| t.id) else { return };
        let res = self.planner.tasks.toggle_task(id).await;
        self.report("saving task", res);
    }

    async fn delete_selected_task(&mut self) {
        let Some(id) = self.tasks_state.selected().and_then(|i| self.planner.tasks.list_tasks().get(i)).map(|t| t.id) else { return };
        let res = self.planner.tasks.delete_task(id).await;
        if self.report("deleting task", res).is_some() {
            self.status = "Task deleted".into();
        }
        Self::clamp_selection(&mut self.tasks_state, self.planner.tasks.list_tasks().len());
    }

    async fn delete_selected_event(&mut self) {
        let sorted = self.planner.schedule.list_sorted();
        let Some(id) = self.events_state.selected().and_then(|i| sorted.get(i)).map(|e| e.id) else { return };
        let res = self.planner.schedule.delete_event(id).await;
        if self.report("deleting event", res).is_some() {
            self.status = "Event deleted".into();
        }
        Self::clamp_selection(&mut self.events_state, self.planner.schedule.list_events().len());
    }

    /// Leaves the form open with the reason in the status line.
    fn refuse_form(&mut self, err: FormError) {
        warn!(error = %err, "form refused");
        self.status = format!("Not saved: {err}");
    }

    async fn submit_form(&mut self) {
        match self.mode {
            Mode::NewTask => {
                let input = match self.form.task_draft().parse() {
                    Ok(input) => input,
                    Err(e) => return self.refuse_form(e),
                };
                let res = self.planner.tasks.add_task(input).await;
                match self.report("saving task", res) {
                    Some(Some(task)) => self.status = format!("Added \"{}\"", task.title),
                    Some(None) => { self.status = "A task needs a title".into(); return; }
                    None => return,
                }
                Self::clamp_selection(&mut self.tasks_state, self.planner.tasks.list_tasks().len());
            }
            Mode::NewEvent => {
                let input = match self.form.event_draft().parse() {
                    Ok(input) => input,
                    Err(e) => return self.refuse_form(e),
                };
                let res = self.planner.schedule.add_event(input).await;
                match self.report("saving event", res) {
                    Some(Some(event)) => self.status = format!("Scheduled \"{}\" on {}", event.title, view::format_date(event.date)),
                    Some(None) => { self.status = "An event needs a title and a date".into(); return; }
                    None => return,
                }
                Self::clamp_selection(&mut self.events_state, self.planner.schedule.list_events().len());
            }
            Mode::View => {}
        }
        self.mode = Mode::View;
    }

    fn watch_timer(&mut self) {
        if !self.timer_rx.has_changed().unwrap_or(false) { return; }
        let timer = *self.timer_rx.borrow_and_update();
        if timer.phase() != self.last_phase {
            self.last_phase = timer.phase();
            self.status = match timer.phase() {
                Phase::Break => "Study session done. Start the timer for your break.".into(),
                Phase::Focus => "Break over. Start the timer for the next session.".into(),
            };
        }
    }
}

async fn run_app<S: KeyValueStore + Clone>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, planner: Planner<S>, config: &Config) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let timer_rx = planner.timer.subscribe();
    let mut app = App { planner, tab: Tab::Dashboard, mode: Mode::View, form: Form::task(), tasks_state: ListState::default(), events_state: ListState::default(), timer_rx, last_phase: Phase::Focus, status: format!("storage: {}", config.database_url), last_tick: Instant::now() };
    App::<S>::clamp_selection(&mut app.tasks_state, app.planner.tasks.list_tasks().len());
    App::<S>::clamp_selection(&mut app.events_state, app.planner.schedule.list_events().len());

    loop {
        app.watch_timer();
        terminal.draw(|f| ui(f, &mut app))?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::View => match (key.code, app.tab) {
                        (KeyCode::Char('q'), _) => break,
                        (KeyCode::Tab, _) => app.tab = app.tab.shifted(1),
                        (KeyCode::BackTab, _) => app.tab = app.tab.shifted(Tab::ALL.len() - 1),
                        (KeyCode::Char(c @ '1'..='4'), _) => app.tab = Tab::ALL[(c as u8 - b'1') as usize],
                        (KeyCode::Up, _) => app.move_selection(false),
                        (KeyCode::Down, _) => app.move_selection(true),
                        (KeyCode::Enter | KeyCode::Char(' '), Tab::Tasks) => app.toggle_selected_task().await,
                        (KeyCode::Char('n'), Tab::Tasks) => { app.form = Form::task(); app.mode = Mode::NewTask; app.status.clear(); }
                        (KeyCode::Char('d'), Tab::Tasks) => app.delete_selected_task().await,
                        (KeyCode::Char('n'), Tab::Schedule) => { app.form = Form::event(app.today()); app.mode = Mode::NewEvent; app.status.clear(); }
                        (KeyCode::Char('d'), Tab::Schedule) => app.delete_selected_event().await,
                        (KeyCode::Char(' ') | KeyCode::Char('s'), Tab::Timer) => app.planner.timer.toggle(),
                        (KeyCode::Char('r'), Tab::Timer) => {
                            app.planner.timer.reset();
                            app.last_phase = Phase::Focus;
                        }
                        _ => {}
                    },
                    Mode::NewTask | Mode::NewEvent => match key.code {
                        KeyCode::Esc => { app.mode = Mode::View; app.status = "Cancelled".into(); }
                        KeyCode::Enter => app.submit_form().await,
                        KeyCode::Tab | KeyCode::Down => { app.form.field = (app.form.field + 1) % app.form.labels.len(); }
                        KeyCode::BackTab | KeyCode::Up => { app.form.field = (app.form.field + app.form.labels.len() - 1) % app.form.labels.len(); }
                        KeyCode::Backspace => { app.form.active().pop(); }
                        KeyCode::Char(c) => app.form.active().push(c),
                        _ => {}
                    },
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}

fn ui<S: KeyValueStore + Clone>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("student planner (Tab: switch, q: quit)"))
        .select(app.tab.index())
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let today = app.today();
    match app.tab {
        Tab::Dashboard => draw_dashboard(f, chunks[1], &DashboardView::from(&app.planner.dashboard(today))),
        Tab::Tasks => {
            let rows = view::task_rows(app.planner.tasks.list_tasks());
            draw_tasks(f, chunks[1], &rows, &mut app.tasks_state);
        }
        Tab::Schedule => {
            let rows = view::event_rows(app.planner.schedule.list_sorted());
            draw_events(f, chunks[1], &rows, &mut app.events_state);
        }
        Tab::Timer => draw_timer(f, chunks[1], &TimerFace::from(&*app.timer_rx.borrow())),
    }

    let (title, text) = match app.mode {
        Mode::View => ("info", format!("{}  |  {}", hints(app.tab), app.status)),
        Mode::NewTask | Mode::NewEvent => (
            if app.mode == Mode::NewTask { "new task" } else { "new event" },
            format!("{}: {}_  |  (Tab/Up/Down to switch field, Enter to save, Esc to cancel)  {}", app.form.labels[app.form.field], app.form.values[app.form.field], app.status),
        ),
    };
    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(footer, chunks[2]);
}

fn hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "1-4: jump to tab",
        Tab::Tasks => "Enter: toggle, n: new, d: delete",
        Tab::Schedule => "n: new, d: delete",
        Tab::Timer => "s/Space: start/pause, r: reset",
    }
}

fn placeholder(text: &str) -> Vec<ListItem<'static>> {
    vec![ListItem::new(text.to_string()).style(Style::default().fg(Color::DarkGray))]
}

fn draw_dashboard(f: &mut Frame, area: Rect, d: &DashboardView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);
    let stats = Paragraph::new(format!(
        "Total tasks: {}   Completed: {}   Upcoming events: {}",
        d.total_tasks, d.completed_tasks, d.upcoming_events
    ))
    .block(Block::default().borders(Borders::ALL).title(d.heading.as_str()));
    f.render_widget(stats, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let today: Vec<ListItem> = if d.today.is_empty() {
        placeholder(view::NO_EVENTS_TODAY)
    } else {
        d.today.iter().map(|e| ListItem::new(format!("{:>5}  {}  [{}]", e.start.as_deref().unwrap_or(""), e.title, e.kind))).collect()
    };
    f.render_widget(List::new(today).block(Block::default().borders(Borders::ALL).title("today")), cols[0]);

    let upcoming: Vec<ListItem> = if d.upcoming_tasks.is_empty() {
        placeholder(view::NO_UPCOMING_TASKS)
    } else {
        d.upcoming_tasks.iter().map(|t| ListItem::new(format!("{} {}  {}", t.icon, t.title, t.due.as_deref().unwrap_or("")))).collect()
    };
    f.render_widget(List::new(upcoming).block(Block::default().borders(Borders::ALL).title("upcoming tasks")), cols[1]);
}

fn draw_tasks(f: &mut Frame, area: Rect, rows: &[TaskRow], state: &mut ListState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = if rows.is_empty() {
        placeholder(view::NO_TASKS)
    } else {
        rows.iter().map(|t| {
            let mark = if t.completed { "[x]" } else { "[ ]" };
            let style = if t.completed { Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT) } else { Style::default() };
            ListItem::new(format!("{mark} {} {}  ({})", t.icon, t.title, t.priority)).style(style)
        }).collect()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("tasks"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, cols[0], state);

    let detail = state.selected().and_then(|i| rows.get(i)).map(|t| {
        format!(
            "Title:\n{}\n\nSubject: {}\nPriority: {}\n{}\n\nStatus: {}",
            t.title,
            t.subject.as_deref().unwrap_or("-"),
            t.priority,
            t.due.as_deref().unwrap_or("No due date"),
            if t.completed { "Done" } else { "Pending" },
        )
    });
    f.render_widget(Paragraph::new(detail.unwrap_or_default()).block(Block::default().borders(Borders::ALL).title("details")), cols[1]);
}

fn draw_events(f: &mut Frame, area: Rect, rows: &[EventRow], state: &mut ListState) {
    let items: Vec<ListItem> = if rows.is_empty() {
        placeholder(view::NO_EVENTS)
    } else {
        rows.iter().map(|e| {
            let when = match &e.time_range { Some(range) => format!("{}  {range}", e.date), None => e.date.clone() };
            ListItem::new(format!("{when}  {}  [{}]", e.title, e.kind))
        }).collect()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("schedule"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, state);
}

fn draw_timer(f: &mut Frame, area: Rect, face: &TimerFace) {
    let color = if face.is_break { Color::Green } else { Color::Blue };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(face.title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(face.clock.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(face.description),
        Line::from(""),
        Line::from(if face.running { "running" } else { "paused" }),
    ];
    let body = Paragraph::new(lines).alignment(Alignment::Center).block(Block::default().borders(Borders::ALL).title("study timer"));
    f.render_widget(body, area);
}
