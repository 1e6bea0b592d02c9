use std::fs::File;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent};
use paperfold::animation::collect_element_ids;
use paperfold::{AnimationState, Element, FoldAnimator, FoldConfig, Terminal, render_lines};
use simplelog::{Config, LevelFilter, WriteLogger};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("paperfold.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut root = ui();
    let config = match std::env::args().nth(1) {
        Some(path) => FoldConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => FoldConfig::new().folds(4).duration_ms(800),
    };
    let mut animator = FoldAnimator::new(&root, "#letter", config)?
        .on_complete(|action| log::info!("fold finished: {action}"));

    let mut term = Terminal::new()?;
    let mut animation = AnimationState::new();

    loop {
        let now = Instant::now();
        animator.tick(&mut root, now);
        animation.update(&root, now);
        animation.cleanup(&collect_element_ids(&root));

        let (width, _) = term.size()?;
        term.draw(&render_lines(&root, &animation, now, width))?;

        // Frame-rate polling while anything moves, otherwise block on input.
        let timeout = match animator.next_deadline() {
            Some(deadline) => Some(deadline.saturating_duration_since(now).min(FRAME)),
            None if animation.has_active_transitions(now) => Some(FRAME),
            None => None,
        };

        for event in term.poll(timeout)? {
            let Event::Key(KeyEvent { code, .. }) = event else {
                continue;
            };
            match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ') => {
                    if let Err(err) = animator.toggle(&mut root, Instant::now()) {
                        log::warn!("toggle ignored: {err}");
                    }
                }
                KeyCode::Char('r') => animation.set_reduced_motion(true),
                _ => {}
            }
        }
    }
}

fn ui() -> Element {
    Element::box_()
        .id("root")
        .child(Element::text("paperfold  (space: toggle, r: reduced motion, q: quit)"))
        .child(Element::text(""))
        .child(
            Element::box_().id("letter").children(
                [
                    "Dear reader,",
                    "",
                    "this letter folds itself into",
                    "four panels when you press",
                    "space, and unfolds again on",
                    "the next press. Every panel",
                    "shows its own slice of the",
                    "text while it moves.",
                ]
                .into_iter()
                .map(Element::text),
            ),
        )
        .child(Element::text("-- end of page --"))
}
