use std::io;
use std::io::Stdout;
use std::io::Write;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;

use torus_life::CellView;
use torus_life::driver::Renderer;
use torus_life::driver::StopHandle;
use torus_life::render::Canvas;

/// How long the input thread waits for an event before checking the stop flag again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raw mode, switched back off on drop
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Draws each generation to the alternate screen. The terminal is restored on drop.
pub struct Terminal<W: Write = Stdout> {
    canvas: Canvas,
    out: W,

    /// Dropped after the alternate screen is left
    _raw: RawMode,
}

impl Terminal {
    pub fn enter(canvas: Canvas) -> io::Result<Self> {
        Self::enter_with(canvas, io::stdout())
    }
}

impl<W: Write> Terminal<W> {
    pub fn enter_with(canvas: Canvas, mut out: W) -> io::Result<Self> {
        // leaves raw mode again if the screen can't be set up
        let raw = RawMode::enable()?;

        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        Ok(Self {
            canvas,
            out,
            _raw: raw,
        })
    }
}

impl<W: Write> Renderer for Terminal<W> {
    type Error = anyhow::Error;

    fn draw(&mut self, cells: CellView<'_>) -> anyhow::Result<()> {
        self.canvas.draw(cells)?;
        let frame = self.canvas.render();

        queue!(self.out, cursor::MoveTo(0, 0))?;

        for line in frame.lines() {
            queue!(
                self.out,
                style::Print(line),
                cursor::MoveToNextLine(1)
            )?;
        }

        self.out.flush()?;

        Ok(())
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
    }
}

/// Returns true if the event asks the app to exit
fn is_exit(event: &CtEvent) -> bool {
    matches!(
        event,
        CtEvent::Key(
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            } | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    )
}

/// Watch for `q` or `Ctrl-C` on a separate thread and set `stop` when one comes in. The thread
/// also exits once `stop` is set by anyone else.
pub fn spawn_input(stop: StopHandle) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        while !stop.is_stopped() {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let event = event::read()?;

            if is_exit(&event) {
                debug!(?event, "exit requested");
                stop.stop();
            }
        }

        Ok(())
    })
}
