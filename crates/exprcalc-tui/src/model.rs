//! TUI application model (Elm architecture).

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::debug;

use exprcalc_orchestration::{
    CalculatorPresenter, CalculatorView, EvaluateUseCase, MainLoopScheduler, SchedulerProvider,
};

use crate::bridge::{ExpressionBuffer, TuiView};
use crate::display::{render_input, render_result, ResultLine};
use crate::footer::render_footer;
use crate::header::render_header;
use crate::history::{
    render_history, HistoryScroll, ERROR_PREFIX, HISTORY_LIMIT, INPUT_PREFIX, RESULT_PREFIX,
    WARN_PREFIX,
};
use crate::keymap::{map_key, KeyAction};
use crate::logs::LogForwarder;
use crate::messages::TuiMessage;
use crate::styles::ColorTheme;

const PAGE_SIZE: usize = 10;
const TICK_RATE: Duration = Duration::from_millis(100);

/// TUI application state (Elm Model).
pub struct TuiApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current result panel content.
    pub result: ResultLine,
    /// History lines, oldest first.
    pub history: Vec<String>,
    pub scroll: HistoryScroll,
    /// Number of evaluations requested.
    pub evaluations: u64,
    /// Number of fatal resets.
    pub restarts: u64,
    pub terminal_width: u16,
    pub terminal_height: u16,
    input: ExpressionBuffer,
    tx: Sender<TuiMessage>,
    rx: Receiver<TuiMessage>,
    presenter: CalculatorPresenter,
    main_loop: Arc<MainLoopScheduler>,
    theme: ColorTheme,
}

impl TuiApp {
    /// Wire a presenter to a [`TuiView`] feeding this model.
    ///
    /// `main_loop` must be the UI scheduler of `schedulers`, or unused by it.
    #[must_use]
    pub fn new(
        eval: Arc<EvaluateUseCase>,
        schedulers: Arc<dyn SchedulerProvider>,
        main_loop: Arc<MainLoopScheduler>,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let input: ExpressionBuffer = Arc::new(Mutex::new(String::new()));
        let view = Arc::new(TuiView::new(Arc::clone(&input), tx.clone()));
        let presenter =
            CalculatorPresenter::new(view as Arc<dyn CalculatorView>, schedulers, eval);
        Self {
            should_quit: false,
            result: ResultLine::Empty,
            history: Vec::new(),
            scroll: HistoryScroll::new(),
            evaluations: 0,
            restarts: 0,
            terminal_width: 80,
            terminal_height: 24,
            input,
            tx,
            rx,
            presenter,
            main_loop,
            theme: ColorTheme::default(),
        }
    }

    /// The expression being typed.
    #[must_use]
    pub fn input(&self) -> String {
        self.input.lock().clone()
    }

    /// Writer for log output while the TUI owns the terminal.
    #[must_use]
    pub fn log_forwarder(&self) -> LogForwarder {
        LogForwarder::new(self.tx.clone())
    }

    /// Deliver queued presenter work, then apply every pending message (Elm Update).
    pub fn update(&mut self) {
        self.main_loop.run_pending();
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Display(value) => {
                self.push_history(format!("{RESULT_PREFIX}{value}"));
                self.result = ResultLine::Value(value);
            }
            TuiMessage::Error(message) => {
                self.push_history(format!("{ERROR_PREFIX}{message}"));
                self.result = ResultLine::Error(message);
            }
            TuiMessage::Restart => self.restart(),
            TuiMessage::Log(line) => self.push_history(line),
            TuiMessage::Quit => {
                self.should_quit = true;
            }
            TuiMessage::Tick => {}
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => {
                self.handle_key_action(action);
            }
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Input(c) => self.input.lock().push(c),
            KeyAction::Backspace => {
                self.input.lock().pop();
            }
            KeyAction::Clear => {
                self.input.lock().clear();
                self.result = ResultLine::Empty;
            }
            KeyAction::Evaluate => self.evaluate(),
            KeyAction::ScrollUp => self.scroll.up(1),
            KeyAction::ScrollDown => self.scroll.down(1, self.history.len()),
            KeyAction::PageUp => self.scroll.up(PAGE_SIZE),
            KeyAction::PageDown => self.scroll.down(PAGE_SIZE, self.history.len()),
            KeyAction::Home => self.scroll.home(),
            KeyAction::End => self.scroll.end(self.history.len()),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn evaluate(&mut self) {
        let expression = self.input();
        self.evaluations += 1;
        self.push_history(format!("{INPUT_PREFIX}{expression}"));
        self.result = ResultLine::Pending;
        self.presenter.on_evaluate_click();
    }

    /// Abandon in-flight work and reset the calculator to its initial state.
    fn restart(&mut self) {
        self.restarts += 1;
        self.presenter.on_destroy();
        self.input.lock().clear();
        self.result = ResultLine::Empty;
        self.push_history(format!("{WARN_PREFIX}evaluation failed, calculator reset"));
        debug!(restarts = self.restarts, "calculator reset");
    }

    fn push_history(&mut self, line: String) {
        self.history.push(line);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
            self.scroll.on_evict();
        }
        self.scroll.on_append(self.history.len());
    }

    /// Abandon in-flight work before the model is dropped.
    pub fn shutdown(&self) {
        self.presenter.on_destroy();
    }

    /// Compute the layout.
    ///
    /// Returns (header, input, result, history, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect, Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Length(3), // input
                Constraint::Length(3), // result
                Constraint::Min(3),    // history
                Constraint::Length(2), // footer
            ])
            .split(area);
        (chunks[0], chunks[1], chunks[2], chunks[3], chunks[4])
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let (header, input, result, history, footer) = Self::compute_layout(frame.area());
        render_header(frame, header, self.evaluations, &self.theme);
        render_input(frame, input, &self.input(), &self.theme);
        render_result(frame, result, &self.result, &self.theme);
        render_history(frame, history, &self.history, self.scroll.offset, &self.theme);
        render_footer(frame, footer, &self.theme);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop.
    ///
    /// Sets up the terminal, loops (render, poll, update) until quit, then
    /// abandons in-flight work and restores the terminal.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        self.shutdown();
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_message(TuiMessage::KeyPress(map_key(key)));
                    }
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            }

            self.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ratatui::backend::TestBackend;

    use exprcalc_core::{
        ArithmeticCalculator, CalcError, OutcomeModel, SyntaxValidator, INVALID_EXPRESSION_MESSAGE,
    };
    use exprcalc_orchestration::{EvaluateExpression, ImmediateSchedulers, Scheduler, Single, UseCase};

    fn make_app() -> TuiApp {
        let schedulers: Arc<dyn SchedulerProvider> = Arc::new(ImmediateSchedulers);
        let eval = Arc::new(EvaluateExpression::new(
            Arc::new(ArithmeticCalculator::new()),
            Arc::new(SyntaxValidator::new()),
            Arc::clone(&schedulers),
        ));
        TuiApp::new(eval, schedulers, Arc::new(MainLoopScheduler::new()))
    }

    fn type_str(app: &mut TuiApp, s: &str) {
        for c in s.chars() {
            app.handle_key_action(KeyAction::Input(c));
        }
    }

    #[test]
    fn initial_state() {
        let app = make_app();
        assert!(!app.should_quit);
        assert_eq!(app.input(), "");
        assert_eq!(app.result, ResultLine::Empty);
        assert!(app.history.is_empty());
        assert_eq!(app.evaluations, 0);
    }

    #[test]
    fn typing_and_editing() {
        let mut app = make_app();
        type_str(&mut app, "12+3");
        assert_eq!(app.input(), "12+3");
        app.handle_key_action(KeyAction::Backspace);
        assert_eq!(app.input(), "12+");
        app.handle_key_action(KeyAction::Clear);
        assert_eq!(app.input(), "");
        app.handle_key_action(KeyAction::Backspace);
        assert_eq!(app.input(), "");
    }

    #[test]
    fn evaluate_valid_expression() {
        let mut app = make_app();
        type_str(&mut app, "2+2");
        app.handle_key_action(KeyAction::Evaluate);
        assert_eq!(app.result, ResultLine::Pending);

        app.update();
        assert_eq!(app.result, ResultLine::Value("4".into()));
        assert_eq!(app.evaluations, 1);
        assert_eq!(app.history, vec!["> 2+2".to_string(), "= 4".to_string()]);
        // The input is kept so it can be edited further.
        assert_eq!(app.input(), "2+2");
    }

    #[test]
    fn evaluate_invalid_expression() {
        let mut app = make_app();
        type_str(&mut app, "2+Q");
        app.handle_key_action(KeyAction::Evaluate);
        app.update();
        assert_eq!(
            app.result,
            ResultLine::Error(INVALID_EXPRESSION_MESSAGE.into())
        );
        assert!(app.history.iter().any(|l| l.starts_with(ERROR_PREFIX)));
    }

    #[test]
    fn quit_via_key_and_message() {
        let mut app = make_app();
        app.handle_key_action(KeyAction::Quit);
        assert!(app.should_quit);

        let mut app = make_app();
        app.handle_message(TuiMessage::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn q_is_typed_not_quit() {
        let mut app = make_app();
        app.handle_message(TuiMessage::KeyPress(KeyAction::Input('q')));
        assert!(!app.should_quit);
        assert_eq!(app.input(), "q");
    }

    #[test]
    fn handle_resize() {
        let mut app = make_app();
        app.handle_message(TuiMessage::Resize {
            width: 120,
            height: 40,
        });
        assert_eq!(app.terminal_width, 120);
        assert_eq!(app.terminal_height, 40);
    }

    #[test]
    fn history_cap() {
        let mut app = make_app();
        for i in 0..HISTORY_LIMIT + 10 {
            app.handle_message(TuiMessage::Log(format!("line {i}")));
        }
        assert_eq!(app.history.len(), HISTORY_LIMIT);
        assert_eq!(app.history[0], "line 10");
        assert_eq!(app.scroll.offset, HISTORY_LIMIT - 1);
    }

    #[test]
    fn forwarded_logs_reach_history() {
        use std::io::Write;

        let mut app = make_app();
        let mut forwarder = app.log_forwarder();
        forwarder.write_all(b"WARN something odd\n").unwrap();
        app.update();
        assert_eq!(
            app.history.last().map(String::as_str),
            Some("[LOG] WARN something odd")
        );
    }

    #[test]
    fn scrolling() {
        let mut app = make_app();
        for i in 0..30 {
            app.handle_message(TuiMessage::Log(format!("line {i}")));
        }
        app.handle_key_action(KeyAction::ScrollUp);
        assert!(!app.scroll.follow);
        app.handle_key_action(KeyAction::Home);
        assert_eq!(app.scroll.offset, 0);
        app.handle_key_action(KeyAction::PageDown);
        assert_eq!(app.scroll.offset, PAGE_SIZE);
        app.handle_key_action(KeyAction::End);
        assert!(app.scroll.follow);
        assert_eq!(app.scroll.offset, 29);
    }

    /// Use-case that always fails fatally and counts `clean` calls.
    struct BrokenEval {
        cleaned: AtomicUsize,
    }

    impl UseCase<OutcomeModel> for BrokenEval {
        fn execute(&self, _: &str) -> Single<OutcomeModel> {
            Single::error(CalcError::Evaluation("broken".into()))
        }

        fn clean(&self) {
            self.cleaned.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn fatal_error_resets_calculator() {
        let eval = Arc::new(BrokenEval {
            cleaned: AtomicUsize::new(0),
        });
        let mut app = TuiApp::new(
            Arc::clone(&eval) as Arc<EvaluateUseCase>,
            Arc::new(ImmediateSchedulers),
            Arc::new(MainLoopScheduler::new()),
        );
        type_str(&mut app, "2+2");
        app.handle_key_action(KeyAction::Evaluate);
        app.update();

        assert_eq!(app.restarts, 1);
        assert_eq!(app.input(), "");
        assert_eq!(app.result, ResultLine::Empty);
        assert_eq!(eval.cleaned.load(Ordering::SeqCst), 1);
        assert!(app.history.last().is_some_and(|l| l.starts_with(WARN_PREFIX)));
    }

    struct QueuedUi {
        ui: Arc<MainLoopScheduler>,
    }

    impl SchedulerProvider for QueuedUi {
        fn computation(&self) -> Arc<dyn Scheduler> {
            ImmediateSchedulers.computation()
        }

        fn ui(&self) -> Arc<dyn Scheduler> {
            Arc::clone(&self.ui) as Arc<dyn Scheduler>
        }
    }

    #[test]
    fn update_drains_main_loop() {
        let main_loop = Arc::new(MainLoopScheduler::new());
        let schedulers: Arc<dyn SchedulerProvider> = Arc::new(QueuedUi {
            ui: Arc::clone(&main_loop),
        });
        let eval = Arc::new(EvaluateExpression::new(
            Arc::new(ArithmeticCalculator::new()),
            Arc::new(SyntaxValidator::new()),
            Arc::clone(&schedulers),
        ));
        let mut app = TuiApp::new(eval, schedulers, Arc::clone(&main_loop));

        type_str(&mut app, "6*7");
        app.handle_key_action(KeyAction::Evaluate);
        assert_eq!(main_loop.pending(), 1);

        app.update();
        assert_eq!(main_loop.pending(), 0);
        assert_eq!(app.result, ResultLine::Value("42".into()));
    }

    #[test]
    fn shutdown_drops_pending_results() {
        let main_loop = Arc::new(MainLoopScheduler::new());
        let schedulers: Arc<dyn SchedulerProvider> = Arc::new(QueuedUi {
            ui: Arc::clone(&main_loop),
        });
        let eval = Arc::new(EvaluateExpression::new(
            Arc::new(ArithmeticCalculator::new()),
            Arc::new(SyntaxValidator::new()),
            Arc::clone(&schedulers),
        ));
        let mut app = TuiApp::new(eval, schedulers, Arc::clone(&main_loop));

        type_str(&mut app, "6*7");
        app.handle_key_action(KeyAction::Evaluate);
        app.shutdown();
        app.update();
        assert_eq!(app.result, ResultLine::Pending);
    }

    #[test]
    fn layout_computation() {
        let area = Rect::new(0, 0, 80, 24);
        let (header, input, result, history, footer) = TuiApp::compute_layout(area);
        assert_eq!(header.y, 0);
        assert_eq!(input.height, 3);
        assert_eq!(result.height, 3);
        assert_eq!(footer.y + footer.height, area.height);
        assert_eq!(
            header.height + input.height + result.height + history.height + footer.height,
            area.height
        );
    }

    #[test]
    fn render_full_screen() {
        let mut app = make_app();
        type_str(&mut app, "(1+2)*3");
        app.handle_key_action(KeyAction::Evaluate);
        app.update();

        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal.draw(|frame| app.render(frame)).unwrap();
        let screen: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|pos| buf.buffer[pos].symbol().to_string())
            .collect();

        assert!(screen.contains("exprcalc"));
        assert!(screen.contains("> (1+2)*3_"));
        assert!(screen.contains("= 9"));
        assert!(screen.contains("quit"));
    }
}
