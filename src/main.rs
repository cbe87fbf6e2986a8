//! notenleer CLI: terminal note-reading trainer.
//!
//! Usage:
//!   nl-cli [--difficulty easy] [--clef-ratio 1.0] [--notes 10] [--silent]
//!
//! Answer with a syllable (do re mi fa sol la si), `r` to replay the
//! current note, `q` to quit.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use std::{env, process};

use nl_master::{
    CpalPlayer, Difficulty, FileStorage, NoteName, NotePlayer, NoteStatus, NullPlayer,
    ProgressionStore, SessionState, Trainer, DIFFICULTY_ORDER, UNLOCK_THRESHOLD,
};
use nl_theory::ledger_line_count;

struct Options {
    difficulty: Difficulty,
    clef_ratio: f64,
    total_notes: usize,
    silent: bool,
    reset_progress: bool,
}

fn parse_options() -> Options {
    let mut options = Options {
        difficulty: Difficulty::Easy,
        clef_ratio: 1.0,
        total_notes: 10,
        silent: false,
        reset_progress: false,
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--difficulty" => {
                let value = args.get(i + 1).and_then(|s| Difficulty::parse(s));
                options.difficulty = value.unwrap_or_else(|| usage("unknown difficulty"));
                i += 2;
            }
            "--clef-ratio" => {
                let value = args.get(i + 1).and_then(|s| s.parse::<f64>().ok());
                let ratio = value.unwrap_or_else(|| usage("bad clef ratio"));
                // Quantize to the slider steps {0, .25, .5, .75, 1}.
                options.clef_ratio = (ratio.clamp(0.0, 1.0) * 4.0).round() / 4.0;
                i += 2;
            }
            "--notes" => {
                let value = args.get(i + 1).and_then(|s| s.parse::<usize>().ok());
                options.total_notes = value.unwrap_or_else(|| usage("bad note count"));
                i += 2;
            }
            "--silent" => {
                options.silent = true;
                i += 1;
            }
            "--reset-progress" => {
                options.reset_progress = true;
                i += 1;
            }
            other => usage(&format!("unknown argument {}", other)),
        }
    }
    options
}

fn usage(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!(
        "Usage: nl-cli [--difficulty <level>] [--clef-ratio <0..1>] [--notes <n>] [--silent] [--reset-progress]"
    );
    process::exit(1);
}

fn main() {
    env_logger::init();
    let options = parse_options();
    log::debug!(
        "difficulty={} clef_ratio={} notes={} silent={}",
        options.difficulty,
        options.clef_ratio,
        options.total_notes,
        options.silent
    );

    let store = ProgressionStore::load(FileStorage::in_temp_dir());
    let player: Box<dyn NotePlayer> = if options.silent {
        Box::new(NullPlayer::new())
    } else {
        Box::new(CpalPlayer::new())
    };
    let mut trainer = Trainer::new(store, player);

    if options.reset_progress {
        trainer.reset_progress();
        println!("Progress cleared.");
    }

    print_progress(&trainer);
    if !trainer.is_unlocked(options.difficulty) {
        eprintln!(
            "Level {} is locked. Score {} points on the level before it first.",
            options.difficulty, UNLOCK_THRESHOLD
        );
        process::exit(1);
    }

    let clock = Instant::now();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        trainer.start_session(
            options.difficulty,
            options.clef_ratio,
            options.total_notes,
            now_ms(&clock),
        );
        pump(&mut trainer, &clock, 600);

        while !trainer.state().is_complete {
            render(trainer.state());
            print!("> ");
            let _ = io::stdout().flush();

            let Some(Ok(line)) = lines.next() else {
                return;
            };
            match line.trim() {
                "q" => return,
                "r" => trainer.replay_current_note(),
                input => match NoteName::parse(input) {
                    Some(answer) => trainer.submit_answer(answer, now_ms(&clock)),
                    None => println!("Answer with do re mi fa sol la si, r to replay, q to quit."),
                },
            }
            // Let the advance delay and next-note playback fire.
            pump(&mut trainer, &clock, 700);
        }

        render(trainer.state());
        println!(
            "Done! Score: {}/{}",
            trainer.state().score,
            trainer.state().total_notes
        );
        if trainer.level_unlocked() {
            println!("*** You unlocked the next level! ***");
        }
        print_progress(&trainer);

        print!("Play again? [y/n] ");
        let _ = io::stdout().flush();
        match lines.next() {
            Some(Ok(line)) if line.trim().eq_ignore_ascii_case("y") => continue,
            _ => return,
        }
    }
}

fn now_ms(clock: &Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

/// Tick the trainer for `wait_ms` of wall-clock time so scheduled
/// transitions come due.
fn pump<S, P>(trainer: &mut Trainer<S, P>, clock: &Instant, wait_ms: u64)
where
    S: nl_master::Storage,
    P: NotePlayer,
{
    let deadline = now_ms(clock) + wait_ms;
    loop {
        trainer.tick(now_ms(clock));
        if now_ms(clock) >= deadline {
            break;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
}

fn render(state: &SessionState) {
    println!();
    println!(
        "Score: {:>2}  Note {}/{}",
        state.score,
        (state.current_index + 1).min(state.total_notes),
        state.total_notes
    );
    for slot in &state.notes {
        let marker = match slot.status {
            NoteStatus::Pending => ".",
            NoteStatus::Active => ">",
            NoteStatus::Warning => "!",
            NoteStatus::Error => "x",
            NoteStatus::Correct => "+",
        };
        let label = if slot.show_label {
            format!("{}", slot.note)
        } else {
            "??".to_string()
        };
        let ledger = match ledger_line_count(slot.note.staff_position) {
            0 => String::new(),
            n => format!("  ({} ledger)", n),
        };
        println!(
            "  {} [{}] position {:>3}  {}{}",
            marker, slot.clef, slot.note.staff_position, label, ledger
        );
    }
}

fn print_progress<S, P>(trainer: &Trainer<S, P>)
where
    S: nl_master::Storage,
    P: NotePlayer,
{
    println!();
    println!("Progress:");
    for difficulty in DIFFICULTY_ORDER {
        let lock = if trainer.is_unlocked(difficulty) { " " } else { "#" };
        println!(
            "  {}{:<9} {:>3}/{}  {:>3}%",
            lock,
            difficulty,
            trainer.score(difficulty),
            UNLOCK_THRESHOLD,
            trainer.progress_percent(difficulty)
        );
    }
}
