//! Terminal demo: shuffles a board, sorts it and draws every frame as a
//! column chart with the two markers underneath. The terminal bell stands in
//! for the tones.
//!
//! Usage: `sortviz [options.toml]`

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use sortviz::audio::{Tone, ToneEmitter};
use sortviz::options::VisualizerOptions;
use sortviz::permutation::RandomPermutation;
use sortviz::sinks::Cursor;
use sortviz::sort::{Element, ElementId, SortSession, SortStep};
use sortviz::util::frame_timing::FramePacer;
use sortviz::VisualizerError;
use web_time::Instant;

const TARGET_FPS: u32 = 60;
/// Terminal columns per slot.
const COLUMN_WIDTH: f64 = 3.0;

/// Rings the bell on each compare; passes stay quiet so the bell does not
/// blur into one long chime.
struct TerminalBell;

impl ToneEmitter for TerminalBell {
    fn emit(&mut self, tone: Tone) -> Result<(), VisualizerError> {
        if tone == Tone::Compare {
            let mut out = io::stdout().lock();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Latest position of everything on screen, written by the sinks.
#[derive(Default)]
struct Board {
    bars: FxHashMap<ElementId, f64>,
    cursor_i: f64,
    cursor_j: f64,
}

fn register_sinks(session: &mut SortSession, board: &Rc<RefCell<Board>>) {
    let ids: Vec<ElementId> =
        session.elements().iter().map(Element::id).collect();
    let sinks = session.sinks_mut();
    for id in ids {
        let board = Rc::clone(board);
        sinks.register_element(id, move |x| {
            let _ = board.borrow_mut().bars.insert(id, x);
        });
    }
    let board_i = Rc::clone(board);
    sinks.register_cursor(Cursor::I, move |x| board_i.borrow_mut().cursor_i = x);
    let board_j = Rc::clone(board);
    sinks.register_cursor(Cursor::J, move |x| board_j.borrow_mut().cursor_j = x);
}

fn column(x: f64, pitch: f64) -> usize {
    (x / pitch * COLUMN_WIDTH).round().max(0.0) as usize
}

fn render(
    session: &SortSession,
    board: &Board,
    out: &mut impl Write,
) -> io::Result<()> {
    let pitch = session.options().layout.pitch();
    let elements = session.elements();
    let width = elements.len() * COLUMN_WIDTH as usize + 1;
    let tallest = elements.iter().map(Element::value).max().unwrap_or(0);

    let placed: Vec<(usize, u32)> = elements
        .iter()
        .filter_map(|element| {
            let x = board.bars.get(&element.id())?;
            Some((column(*x, pitch), element.value()))
        })
        .collect();

    write!(out, "\x1b[H\x1b[2J")?;
    for row in (1..=tallest).rev() {
        let mut line = vec![b' '; width];
        for &(col, value) in &placed {
            if value >= row && col < width {
                line[col] = b'#';
            }
        }
        out.write_all(&line)?;
        writeln!(out)?;
    }

    let mut markers = vec![b' '; width + 1];
    let i = column(board.cursor_i, pitch);
    let j = column(board.cursor_j, pitch);
    if i < markers.len() {
        markers[i] = b'i';
    }
    if j < markers.len() {
        markers[j] = if i == j { b'*' } else { b'j' };
    }
    out.write_all(&markers)?;
    writeln!(out)?;
    writeln!(out, "{:?}", session.values())?;
    out.flush()
}

fn run(options: VisualizerOptions) -> Result<(), VisualizerError> {
    let mut session = SortSession::new(
        options,
        RandomPermutation::new(),
        TerminalBell,
        Instant::now(),
    )?;
    let board = Rc::new(RefCell::new(Board::default()));
    register_sinks(&mut session, &board);
    // Snap everything into place now that the sinks exist.
    session.shuffle()?;

    let started = Instant::now();
    let completion = session.start_sort(started)?;
    let mut pacer = FramePacer::new(TARGET_FPS, started);
    let stdout = io::stdout();
    loop {
        let now = Instant::now();
        let running = session.tick(now)?;
        render(&session, &board.borrow(), &mut stdout.lock())?;
        pacer.end_frame(now);
        if !running {
            break;
        }
        std::thread::sleep(pacer.wait_time(Instant::now()));
    }

    log::info!(
        "{:?} after {} swaps ({:.0} fps, completion fired: {})",
        session.status(),
        session
            .trace()
            .iter()
            .filter(|step| matches!(step, SortStep::Swap { .. }))
            .count(),
        pacer.fps(),
        completion.is_done()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match VisualizerOptions::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => VisualizerOptions::default(),
    };

    if let Err(e) = run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
