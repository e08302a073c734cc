// src/main.rs

use camera_trainer_lib::constants::{APP_DIR_NAME, DB_FILE_NAME};
use camera_trainer_lib::curriculum::{Curriculum, SuggestedSettings};
use camera_trainer_lib::database;
use camera_trainer_lib::models::{
    Aperture, CameraSettings, Iso, Scenario, ShutterSpeed, SimulatorReading,
};
use camera_trainer_lib::progress::ProgressStore;
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "camera-trainer", version, about = "Learn manual exposure on the Canon EOS 1500D")]
struct Cli {
    /// Where progress is stored.
    #[arg(long, env = "CAMERA_TRAINER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overall progress, points and streak.
    Status,
    /// The lesson catalog with completion marks.
    Lessons,
    /// The challenge catalog with completion marks.
    Challenges,
    CompleteLesson {
        id: String,
        #[arg(long)]
        score: Option<f64>,
    },
    StartChallenge {
        id: String,
    },
    CompleteChallenge {
        id: String,
    },
    /// Log minutes spent in the simulator.
    Practice {
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },
    /// Evaluate one set of dials against a scene.
    Simulate {
        #[arg(long, default_value = "800")]
        iso: Iso,
        #[arg(long, default_value = "f/5.6")]
        aperture: Aperture,
        #[arg(long, default_value = "1/60")]
        shutter: ShutterSpeed,
        #[arg(long, default_value = "portrait")]
        scenario: Scenario,
    },
    /// Auto vs manual side by side.
    Compare {
        id: Option<String>,
    },
    Cheatsheet {
        id: Option<String>,
    },
    /// Erase all progress.
    Reset,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let curriculum = Curriculum::builtin().map_err(|e| e.to_string())?;

    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    });
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| e.to_string())?;
    }
    let db_path = data_dir.join(DB_FILE_NAME);
    info!("Database path: {:?}", db_path);
    let conn = database::open(&db_path).map_err(|e| e.to_string())?;

    let mut store = ProgressStore::open(conn);

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => print_status(&store, &curriculum),
        Command::Lessons => {
            for lesson in &curriculum.lessons {
                let mark = match store.get_lesson_progress(&lesson.id) {
                    Some(p) if p.completed => "x",
                    _ => " ",
                };
                println!(
                    "[{}] {:>2}. {} ({}, {}) - {}",
                    mark, lesson.order, lesson.title, lesson.duration, lesson.category, lesson.id
                );
            }
        }
        Command::Challenges => {
            for challenge in &curriculum.challenges {
                let mark = match store.get_challenge_progress(&challenge.id) {
                    Some(p) if p.completed => "x",
                    Some(p) if p.started => "~",
                    _ => " ",
                };
                println!(
                    "[{}] {} ({}) - {}",
                    mark, challenge.title, challenge.difficulty, challenge.id
                );
            }
        }
        Command::CompleteLesson { id, score } => {
            let lesson = curriculum
                .lesson(&id)
                .ok_or_else(|| format!("unknown lesson: {}", id))?;
            store.complete_lesson(&lesson.id, score);
            println!("Completed \"{}\"", lesson.title);
            print_status(&store, &curriculum);
        }
        Command::StartChallenge { id } => {
            let challenge = curriculum
                .challenge(&id)
                .ok_or_else(|| format!("unknown challenge: {}", id))?;
            store.start_challenge(&challenge.id);
            println!("Started \"{}\"", challenge.title);
            for objective in &challenge.objectives {
                println!("  - {}", objective);
            }
        }
        Command::CompleteChallenge { id } => {
            let challenge = curriculum
                .challenge(&id)
                .ok_or_else(|| format!("unknown challenge: {}", id))?;
            store.complete_challenge(&challenge.id);
            println!("Submitted \"{}\"", challenge.title);
            print_status(&store, &curriculum);
        }
        Command::Practice { minutes } => {
            store.add_simulator_time(minutes)?;
            println!(
                "Simulator practice: {:.1} min",
                store.simulator_practice_time()
            );
        }
        Command::Simulate {
            iso,
            aperture,
            shutter,
            scenario,
        } => {
            let settings = CameraSettings {
                iso,
                aperture,
                shutter,
                scenario,
            };
            print_reading(&settings.evaluate());
        }
        Command::Compare { id } => {
            let comparisons: Vec<_> = match id {
                Some(id) => vec![curriculum
                    .comparison(&id)
                    .ok_or_else(|| format!("unknown comparison: {}", id))?],
                None => curriculum.mode_comparisons.iter().collect(),
            };
            for cmp in comparisons {
                println!("== {} ({})", cmp.title, cmp.category);
                print_side("Auto", &cmp.auto_settings, cmp.scenario());
                println!("  {}", cmp.auto_description);
                print_side("Manual", &cmp.manual_settings, cmp.scenario());
                println!("  {}", cmp.manual_description);
                println!("  Lesson: {}", cmp.lesson);
                println!();
            }
        }
        Command::Cheatsheet { id } => {
            let sheets: Vec<_> = match id {
                Some(id) => vec![curriculum
                    .cheat_sheet(&id)
                    .ok_or_else(|| format!("unknown cheat sheet: {}", id))?],
                None => curriculum.cheat_sheets.iter().collect(),
            };
            for sheet in sheets {
                println!("== {}", sheet.title);
                println!(
                    "{:<24} {:<5} {:<10} {:<8} {:<10} Notes",
                    "Scenario", "Mode", "ISO", "Aperture", "Shutter"
                );
                for item in &sheet.items {
                    println!(
                        "{:<24} {:<5} {:<10} {:<8} {:<10} {}",
                        item.scenario, item.mode, item.iso, item.aperture, item.shutter_speed, item.notes
                    );
                }
                println!();
            }
        }
        Command::Reset => {
            store.reset_progress();
            println!("All progress erased.");
        }
    }

    debug!("Flushing progress before exit");
    store.flush();
    Ok(())
}

fn print_status(store: &ProgressStore, curriculum: &Curriculum) {
    println!(
        "Progress: {}% ({}/{} lessons)",
        store.get_overall_progress(),
        store.get_completed_lessons_count(),
        store.get_total_lessons_count()
    );
    println!(
        "Challenges: {}/{}",
        store.get_completed_challenges_count(),
        curriculum.challenges.len()
    );
    println!("Points: {}", store.total_points());
    println!("Streak: {} day(s)", store.streak());
    println!("Practice: {:.1} min", store.simulator_practice_time());
}

fn print_reading(r: &SimulatorReading) {
    let s = &r.settings;
    println!(
        "ISO {}  {}  {}  [{}, target EV {}]",
        s.iso,
        s.aperture,
        s.shutter,
        s.scenario,
        s.scenario.base_ev()
    );
    println!(
        "EV {:.2} (diff {:+.2}): {} [{:?}]",
        r.reading.exposure_value,
        r.reading.exposure_diff,
        r.class.label(),
        r.class.severity()
    );
    println!(
        "Brightness {:.0}%  Meter {:.0}%",
        r.effects.brightness, r.meter_position
    );
    if let Some(dof) = r.effects.depth_of_field_factor {
        println!("Depth of field {:.2}", dof);
    }
    if r.effects.has_noise_warning() {
        println!("! High ISO noise (level {:.1})", r.effects.noise_level);
    }
    if r.effects.has_motion_blur {
        println!("! Motion blur");
    }
}

fn print_side(label: &str, settings: &SuggestedSettings, scenario: Option<Scenario>) {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "  {}: {} ISO {} {} {}",
        label,
        text(&settings.mode),
        text(&settings.iso),
        text(&settings.aperture),
        text(&settings.shutter_speed)
    );
    if let Some(r) = scenario.and_then(|sc| settings.exposure_for(sc)) {
        println!(
            "    EV {:.2} (diff {:+.2}): {}",
            r.reading.exposure_value,
            r.reading.exposure_diff,
            r.class.label()
        );
    }
}
